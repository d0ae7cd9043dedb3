//! LZ4 frame format: self-describing container with optional checksums,
//! content size and skippable frames.
//!
//! Only independent blocks are produced and accepted.

pub mod compress;
pub mod decompress;
pub mod header;
pub mod types;

pub use compress::{compress_frame, FrameEncoder};
pub use decompress::{decompress_frame, frame_info, FrameDecoder};
pub use header::{compress_frame_bound, write_skippable_frame};
pub use types::{
    BlockChecksum, BlockSizeId, ContentChecksum, CorruptionCause, FrameError, FrameInfo,
    FrameType, Preferences,
};
