//! File front end: compress and decompress files, readers and writers with
//! either container format.
//!
//! Errors are reported through `anyhow` with the file name attached.

pub mod compress_file;
pub mod decompress_file;
pub mod file_io;

pub use compress_file::{compress_file, compress_stream, CompressOptions};
pub use decompress_file::{decompress_buffer, decompress_file, decompress_stream, detect_format};
pub use file_io::{compressed_name, decompressed_name, LZ4_EXTENSION, STDIN_MARK, STDOUT_MARK};

/// Container written by compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// LZ4 frame format (magic `0x184D2204`).
    #[default]
    Frame,
    /// "LZ4Block" stream format.
    BlockStream,
}

/// Byte counts of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IoSummary {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl IoSummary {
    /// `bytes_out` as a percentage of `bytes_in`.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 100.0;
        }
        self.bytes_out as f64 * 100.0 / self.bytes_in as f64
    }
}
