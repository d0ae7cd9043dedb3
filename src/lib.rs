// lz4-codec: LZ4 block codec with the frame and "LZ4Block" containers

pub mod error;
pub mod config;
pub mod block;
pub mod hc;
pub mod codec;
pub mod xxhash;
pub mod frame;
pub mod block_stream;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress, compress_into, compress_prepend_size, decompress, decompress_fast,
    decompress_fast_into, decompress_into, decompress_size_prepended, max_compressed_length,
};
pub use codec::{BlockCompressor, BlockDecompressor, Compressor, Decompressor, Factory};
pub use error::Lz4Error;
pub use hc::compress_hc;
