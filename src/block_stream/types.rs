//! "LZ4Block" stream constants, header layout and errors.
//!
//! Every block, including the end mark, starts with a 21-byte header:
//!
//! ```text
//! "LZ4Block" (8) | token (1) | compressed len (4, LE) | original len (4, LE) | checksum (4, LE)
//! ```
//!
//! The token is `method | level`, where `method` is [`METHOD_RAW`] or
//! [`METHOD_LZ4`] and `level` bounds the original length to
//! `1 << (COMPRESSION_LEVEL_BASE + level)`.

use thiserror::Error;

use crate::error::Lz4Error;

pub const MAGIC: &[u8; 8] = b"LZ4Block";
pub const MAGIC_LENGTH: usize = MAGIC.len();
/// Magic, token, compressed length, original length, checksum.
pub const HEADER_LENGTH: usize = MAGIC_LENGTH + 1 + 4 + 4 + 4;

pub const COMPRESSION_LEVEL_BASE: u32 = 10;
pub const MIN_BLOCK_SIZE: usize = 64;
pub const MAX_BLOCK_SIZE: usize = 1 << (COMPRESSION_LEVEL_BASE + 0x0F);

pub const METHOD_RAW: u8 = 0x10;
pub const METHOD_LZ4: u8 = 0x20;
const METHOD_MASK: u8 = 0xF0;
const LEVEL_MASK: u8 = 0x0F;

/// XXH32 seed of the block checksum.
pub const CHECKSUM_SEED: u32 = 0x9747_B28C;
/// Only the low 28 bits of the hash are stored.
pub const CHECKSUM_MASK: u32 = 0x0FFF_FFFF;

/// Level stored in the token for `block_size`: `ceil(log2(block_size)) - 10`,
/// floored at zero.
pub fn compression_level(block_size: usize) -> Result<u8, BlockStreamError> {
    if block_size < MIN_BLOCK_SIZE {
        return Err(BlockStreamError::InvalidArgument("block size below 64 bytes"));
    }
    if block_size > MAX_BLOCK_SIZE {
        return Err(BlockStreamError::InvalidArgument("block size above 32 MiB"));
    }
    Ok(level_for(block_size))
}

/// [`compression_level`] without the range check.
pub(crate) const fn level_for(block_size: usize) -> u8 {
    let ceil_log2 = usize::BITS - (block_size - 1).leading_zeros();
    ceil_log2.saturating_sub(COMPRESSION_LEVEL_BASE) as u8
}

/// Decoded 21-byte block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub method: u8,
    pub level: u8,
    pub compressed_len: i32,
    pub original_len: i32,
    pub checksum: u32,
}

impl BlockHeader {
    /// Header of the empty block closing a stream.
    pub fn end_mark(level: u8) -> Self {
        BlockHeader {
            method: METHOD_RAW,
            level,
            compressed_len: 0,
            original_len: 0,
            checksum: 0,
        }
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        out.push(self.method | self.level);
        out.extend_from_slice(&self.compressed_len.to_le_bytes());
        out.extend_from_slice(&self.original_len.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
    }

    /// Parses `bytes[..HEADER_LENGTH]`.  Only the magic is checked here.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LENGTH || &bytes[..MAGIC_LENGTH] != MAGIC {
            return None;
        }
        let field = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        let token = bytes[MAGIC_LENGTH];
        Some(BlockHeader {
            method: token & METHOD_MASK,
            level: token & LEVEL_MASK,
            compressed_len: i32::from_le_bytes(field(MAGIC_LENGTH + 1)),
            original_len: i32::from_le_bytes(field(MAGIC_LENGTH + 5)),
            checksum: u32::from_le_bytes(field(MAGIC_LENGTH + 9)),
        })
    }

    /// Largest original length the level allows.
    pub fn max_original_len(&self) -> usize {
        1 << (COMPRESSION_LEVEL_BASE + self.level as u32)
    }

    pub fn is_end_mark(&self) -> bool {
        self.compressed_len == 0 && self.original_len == 0
    }
}

/// Errors from block-stream encoding and decoding.
#[derive(Debug, Error)]
pub enum BlockStreamError {
    /// `offset` is relative to the start of the input.
    #[error("block stream corrupted at offset {offset}")]
    StreamCorrupted {
        offset: usize,
        #[source]
        cause: BlockStreamCause,
    },

    #[error("invalid block stream argument: {0}")]
    InvalidArgument(&'static str),

    #[error("block compression failed")]
    Compress(#[from] Lz4Error),
}

impl BlockStreamError {
    pub(crate) fn corrupted(offset: usize, cause: BlockStreamCause) -> Self {
        BlockStreamError::StreamCorrupted { offset, cause }
    }

    pub fn cause(&self) -> Option<&BlockStreamCause> {
        match self {
            BlockStreamError::StreamCorrupted { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// What made a block stream unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockStreamCause {
    #[error("missing \"LZ4Block\" magic")]
    BadMagic,
    #[error("unknown compression method 0x{0:02X}")]
    UnknownMethod(u8),
    #[error("original length {original} exceeds the {max}-byte level limit")]
    BlockTooLarge { original: i32, max: usize },
    #[error("inconsistent lengths: compressed {compressed}, original {original}")]
    InvalidLengths { compressed: i32, original: i32 },
    #[error("end mark carries checksum 0x{0:08X}")]
    EndMarkChecksum(u32),
    #[error("stream ended prematurely: {needed} more bytes expected")]
    Truncated { needed: usize },
    #[error("block declared {declared} compressed bytes but used {consumed}")]
    CompressedLength { declared: usize, consumed: usize },
    #[error("checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    Checksum { stored: u32, computed: u32 },
    #[error("block could not be decoded")]
    Block {
        #[source]
        source: Lz4Error,
    },
}
