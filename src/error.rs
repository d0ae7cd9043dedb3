//! Block-level error type shared by the fast compressor, the HC compressor and
//! both decompression modes.
//!
//! Container formats wrap this type in their own error enums
//! ([`crate::frame::FrameError`], [`crate::block_stream::BlockStreamError`])
//! so that the original block failure stays reachable through
//! [`std::error::Error::source`].

use thiserror::Error;

/// Errors returned by block compression and decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Lz4Error {
    /// A caller-supplied offset or length is out of range for its buffer.
    /// Reported before any buffer is read or written.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The destination cannot hold the result.
    ///
    /// `needed` is known when the full size could be computed up front (for
    /// example a raw block or a size-prefixed header); it is `None` when the
    /// encoder ran out of room part-way through.
    #[error("destination too small: capacity {capacity} bytes{}", needed_suffix(.needed))]
    DestinationTooSmall {
        needed: Option<usize>,
        capacity: usize,
    },

    /// The compressed input is structurally invalid. `offset` is the position
    /// in the source (relative to the start of the block) of the offending
    /// field.
    #[error("malformed input at offset {offset}")]
    CorruptInput { offset: usize },
}

fn needed_suffix(needed: &Option<usize>) -> String {
    match needed {
        Some(n) => format!(", {n} needed"),
        None => String::new(),
    }
}

impl Lz4Error {
    pub(crate) fn corrupt(offset: usize) -> Self {
        Lz4Error::CorruptInput { offset }
    }

    pub(crate) fn too_small(capacity: usize) -> Self {
        Lz4Error::DestinationTooSmall {
            needed: None,
            capacity,
        }
    }

    /// Returns `true` for [`Lz4Error::CorruptInput`].
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Lz4Error::CorruptInput { .. })
    }
}
