//! LZ4 frame format constants, descriptor types, preferences and errors.
//!
//! Covers:
//! - magic numbers and descriptor bit layout
//! - [`BlockSizeId`], [`BlockChecksum`], [`ContentChecksum`], [`FrameType`]
//! - [`FrameInfo`] (what a header says) and [`Preferences`] (how to write one)
//! - [`FrameError`] and its [`CorruptionCause`]

use thiserror::Error;

use crate::codec::Compressor;
use crate::error::Lz4Error;

// ─────────────────────────────────────────────────────────────────────────────
// Wire constants
// ─────────────────────────────────────────────────────────────────────────────

/// Magic number opening every LZ4 frame (stored little-endian).
pub const LZ4F_MAGIC: u32 = 0x184D_2204;

/// First skippable-frame magic; the low nibble is free (`0x184D2A50..=0x184D2A5F`).
pub const LZ4F_SKIPPABLE_MAGIC: u32 = 0x184D_2A50;

/// Mask selecting the fixed part of a skippable-frame magic.
pub const LZ4F_SKIPPABLE_MASK: u32 = 0xFFFF_FFF0;

/// High bit of a block length word: the block is stored uncompressed.
pub const LZ4F_BLOCK_UNCOMPRESSED_FLAG: u32 = 0x8000_0000;

pub const MAGIC_SIZE: usize = 4;
/// Block header (length word) size.
pub const BH_SIZE: usize = 4;
/// Block checksum size.
pub const BF_SIZE: usize = 4;
/// Content checksum size.
pub const CHECKSUM_SIZE: usize = 4;
/// Header without optional fields: magic, FLG, BD, HC.
pub const MIN_FH_SIZE: usize = 7;
/// Header with the 8-byte content size.
pub const MAX_FH_SIZE: usize = 15;

// ── FLG byte ────────────────────────────────────────────────────────────────

pub const FLG_VERSION_SHIFT: u32 = 6;
pub const FLG_VERSION: u8 = 0b01;
pub const FLG_BLOCK_INDEPENDENCE: u8 = 1 << 5;
pub const FLG_BLOCK_CHECKSUM: u8 = 1 << 4;
pub const FLG_CONTENT_SIZE: u8 = 1 << 3;
pub const FLG_CONTENT_CHECKSUM: u8 = 1 << 2;
pub const FLG_RESERVED: u8 = 0b11;

// ── BD byte ─────────────────────────────────────────────────────────────────

pub const BD_BLOCK_SIZE_SHIFT: u32 = 4;
pub const BD_RESERVED: u8 = 0x8F;

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor enums
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum size of the blocks in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlockSizeId {
    #[default]
    Max64Kb = 4,
    Max256Kb = 5,
    Max1Mb = 6,
    Max4Mb = 7,
}

impl BlockSizeId {
    /// Maximum block size in bytes: `1 << (2 * id + 8)`.
    pub fn block_size(self) -> usize {
        1 << (2 * self as u32 + 8)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            4 => Some(BlockSizeId::Max64Kb),
            5 => Some(BlockSizeId::Max256Kb),
            6 => Some(BlockSizeId::Max1Mb),
            7 => Some(BlockSizeId::Max4Mb),
            _ => None,
        }
    }
}

/// Whether each block is followed by a checksum of its stored bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockChecksum {
    #[default]
    Disabled,
    Enabled,
}

/// Whether the frame ends with a checksum of the decoded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentChecksum {
    Disabled,
    #[default]
    Enabled,
}

/// Kind of frame found at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameType {
    #[default]
    Frame,
    Skippable,
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameInfo / Preferences
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters carried by a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    pub block_size_id: BlockSizeId,
    pub block_checksum: BlockChecksum,
    pub content_checksum: ContentChecksum,
    /// Decoded size when the header records it.  For a skippable frame this
    /// is the size of the skipped payload.
    pub content_size: Option<u64>,
    pub frame_type: FrameType,
}

/// Settings used when writing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub frame_info: FrameInfo,
    /// Block compressor used for every block of the frame.
    pub compressor: Compressor,
}

impl Preferences {
    pub fn with_block_size(mut self, id: BlockSizeId) -> Self {
        self.frame_info.block_size_id = id;
        self
    }

    pub fn with_block_checksum(mut self, enabled: bool) -> Self {
        self.frame_info.block_checksum = if enabled {
            BlockChecksum::Enabled
        } else {
            BlockChecksum::Disabled
        };
        self
    }

    pub fn with_content_checksum(mut self, enabled: bool) -> Self {
        self.frame_info.content_checksum = if enabled {
            ContentChecksum::Enabled
        } else {
            ContentChecksum::Disabled
        };
        self
    }

    pub fn with_content_size(mut self, size: Option<u64>) -> Self {
        self.frame_info.content_size = size;
        self
    }

    pub fn with_compressor(mut self, compressor: Compressor) -> Self {
        self.compressor = compressor;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from frame encoding and decoding.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The input is not a valid frame; `offset` is where the problem was
    /// found, relative to the start of the input.
    #[error("stream frame corrupted at offset {offset}")]
    StreamCorrupted {
        offset: usize,
        #[source]
        cause: CorruptionCause,
    },

    #[error("invalid frame argument: {0}")]
    InvalidArgument(&'static str),

    /// A block could not be encoded.
    #[error("block compression failed")]
    Compress(#[from] Lz4Error),
}

impl FrameError {
    pub(crate) fn corrupted(offset: usize, cause: CorruptionCause) -> Self {
        FrameError::StreamCorrupted { offset, cause }
    }

    /// The corruption cause, if this is a decoding failure.
    pub fn cause(&self) -> Option<&CorruptionCause> {
        match self {
            FrameError::StreamCorrupted { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// What made a frame unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptionCause {
    #[error("unknown magic number 0x{0:08X}")]
    BadMagic(u32),
    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u8),
    #[error("reserved descriptor bits are set")]
    ReservedBits,
    #[error("dependent blocks are not supported")]
    DependentBlocks,
    #[error("invalid block size id {0}")]
    InvalidBlockSize(u8),
    #[error("header checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}")]
    HeaderChecksum { stored: u8, computed: u8 },
    #[error("input truncated: {needed} more bytes expected")]
    Truncated { needed: usize },
    #[error("block of {size} bytes exceeds the {max}-byte maximum")]
    BlockTooLarge { size: usize, max: usize },
    #[error("block checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    BlockChecksum { stored: u32, computed: u32 },
    #[error("content checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    ContentChecksum { stored: u32, computed: u32 },
    #[error("content size mismatch: header declares {declared}, decoded {actual}")]
    ContentSize { declared: u64, actual: u64 },
    #[error("block could not be decoded")]
    Block {
        #[source]
        source: Lz4Error,
    },
}
