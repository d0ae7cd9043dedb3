//! "LZ4Block" stream format: a sequence of independently compressed blocks,
//! each behind a 21-byte header carrying its lengths and a checksum of the
//! decoded bytes, closed by an empty end-mark block.
//!
//! Submodules:
//! - [`types`]:      header layout, constants, errors
//! - [`compress`]:   [`BlockStreamEncoder`] and one-shot compression
//! - [`decompress`]: [`BlockStreamDecoder`] and one-shot decompression

pub mod compress;
pub mod decompress;
pub mod types;

pub use compress::{compress_block_stream, compress_block_stream_with, BlockStreamEncoder};
pub use decompress::{decompress_block_stream, BlockStreamDecoder};
pub use types::{BlockStreamCause, BlockStreamError, MAGIC};
