//! LZ4 block format: sequence encoding, the fast compressor and the decoder.
//!
//! Submodules:
//! - [`types`]:           constants, hashing, sequence writer
//! - [`compress`]:        greedy single-table compressor
//! - [`decompress_core`]: the shared decoding state machine
//! - [`decompress_api`]:  trusting and defensive entry points
//! - [`size_prefixed`]:   blocks preceded by their decoded length

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod size_prefixed;
pub mod types;

pub use compress::{
    compress, compress_fast, compress_into, compress_to_vec, compress_with_prefix, FastEncoder,
};
pub use decompress_api::{
    decompress, decompress_fast, decompress_fast_into, decompress_fast_with_prefix64k,
    decompress_into, decompress_to_vec,
};
pub use size_prefixed::{compress_prepend_size, decompress_size_prepended};
pub use types::max_compressed_length;
