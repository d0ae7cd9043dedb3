//! HC constants, compression levels and the match record used by the lazy
//! parser.

use crate::block::types::{MIN_MATCH, ML_MASK};

// ─────────────────────────────────────────────────────────────────────────────
// Levels
// ─────────────────────────────────────────────────────────────────────────────

/// Lowest HC level (a single chain hop per position).
pub const HC_CLEVEL_MIN: i32 = 1;

/// Level used when the caller does not pick one, and for levels below 1.
pub const HC_CLEVEL_DEFAULT: i32 = 9;

/// Highest HC level; larger requests are clamped to it.
pub const HC_CLEVEL_MAX: i32 = 17;

/// Maps a requested level onto `HC_CLEVEL_MIN..=HC_CLEVEL_MAX`.
pub fn normalize_level(level: i32) -> i32 {
    if level < HC_CLEVEL_MIN {
        HC_CLEVEL_DEFAULT
    } else {
        level.min(HC_CLEVEL_MAX)
    }
}

/// Chain hops allowed per searched position: `2^(level - 1)`.
/// The default level gives 256.
pub fn max_attempts(level: i32) -> usize {
    1usize << (normalize_level(level) - 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Hash bits of the chain head table.
pub const HASH_LOG_HC: u32 = 15;
pub const HASH_TABLE_SIZE_HC: usize = 1 << HASH_LOG_HC;

/// The delta ring covers a full 64 KB window.
pub const CHAIN_SIZE: usize = 1 << 16;
pub const CHAIN_MASK: usize = CHAIN_SIZE - 1;

/// Match length beyond which an overlapping successor takes priority.
pub const OPTIMAL_ML: isize = (ML_MASK - 1 + MIN_MATCH) as isize;

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate match: `len` bytes at `start` repeating the bytes at
/// `reference`.
///
/// Fields are signed because the lazy parser shortens matches from the front
/// ([`Match::fix`]) and may transiently drive `len` below [`MIN_MATCH`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Match {
    pub start: isize,
    pub reference: isize,
    pub len: isize,
}

impl Match {
    #[inline]
    pub fn end(&self) -> isize {
        self.start + self.len
    }

    /// Drops the first `correction` bytes of the match.
    #[inline]
    pub fn fix(&mut self, correction: isize) {
        self.start += correction;
        self.reference += correction;
        self.len -= correction;
    }
}
