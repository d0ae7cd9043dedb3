//! Hash-chain match finder.
//!
//! The head table maps the hash of a 4-byte prefix to the most recent
//! position with that hash.  The chain ring stores, for every position, the
//! distance back to the previous position with the same hash (capped at the
//! window size), so all recent occurrences of a prefix can be walked from
//! newest to oldest.
//!
//! Positions are inserted lazily: each search first indexes every position
//! between the last insertion point and the position being searched.

use super::types::{Match, CHAIN_MASK, CHAIN_SIZE, HASH_LOG_HC, HASH_TABLE_SIZE_HC};
use crate::block::types::{
    common_bytes, common_bytes_backward, hash4, read_u32, MAX_DISTANCE, MIN_MATCH,
};

/// Head table plus delta ring for one input.
pub struct HashChain {
    head: Vec<i32>,
    chain: Vec<u16>,
    next_to_update: usize,
    max_attempts: usize,
}

impl HashChain {
    pub fn new(max_attempts: usize) -> Self {
        HashChain {
            head: vec![-1; HASH_TABLE_SIZE_HC],
            chain: vec![0; CHAIN_SIZE],
            next_to_update: 0,
            max_attempts,
        }
    }

    /// Forgets all positions.  Chain slots are always written before they are
    /// read, so only the heads need clearing.
    pub fn reset(&mut self, max_attempts: usize) {
        self.head.fill(-1);
        self.next_to_update = 0;
        self.max_attempts = max_attempts;
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// First position not yet indexed.
    pub fn next_to_update(&self) -> usize {
        self.next_to_update
    }

    #[inline]
    fn hash_at(buf: &[u8], pos: usize) -> usize {
        hash4(read_u32(buf, pos), HASH_LOG_HC)
    }

    #[inline]
    fn head_at(&self, buf: &[u8], pos: usize) -> isize {
        self.head[Self::hash_at(buf, pos)] as isize
    }

    /// Previous position with the same hash as `pos`.
    #[inline]
    fn next(&self, pos: isize) -> isize {
        pos - self.chain[pos as usize & CHAIN_MASK] as isize
    }

    #[inline]
    fn add_hash(&mut self, buf: &[u8], pos: usize) {
        let h = Self::hash_at(buf, pos);
        let delta = (pos as isize - self.head[h] as isize).min(MAX_DISTANCE as isize);
        self.chain[pos & CHAIN_MASK] = delta as u16;
        self.head[h] = pos as i32;
    }

    /// Indexes every position below `pos` not indexed yet.
    pub fn insert(&mut self, buf: &[u8], pos: usize) {
        while self.next_to_update < pos {
            self.add_hash(buf, self.next_to_update);
            self.next_to_update += 1;
        }
    }

    /// Finds the longest match starting at `off`, extending no further than
    /// `match_limit`.  Returns `false` when no 4-byte match is in the window.
    pub fn insert_and_find_best_match(
        &mut self,
        buf: &[u8],
        off: usize,
        match_limit: usize,
        m: &mut Match,
    ) -> bool {
        m.start = off as isize;
        m.len = 0;

        self.insert(buf, off);

        let off_i = off as isize;
        let floor = (off_i - MAX_DISTANCE as isize).max(0);
        let mut reference = self.head_at(buf, off);

        // A candidate within 4 bytes is a repetition; index it in bulk.
        if reference >= off_i - 4 && reference >= 0 && reference < off_i {
            let r = reference as usize;
            if read_u32(buf, r) == read_u32(buf, off) {
                let delta = off - r;
                let len = MIN_MATCH + common_bytes(buf, r + MIN_MATCH, off + MIN_MATCH, match_limit);
                let end = off + len - (MIN_MATCH - 1);
                let mut ptr = off;
                while ptr + delta < end {
                    self.chain[ptr & CHAIN_MASK] = delta as u16;
                    ptr += 1;
                }
                loop {
                    self.chain[ptr & CHAIN_MASK] = delta as u16;
                    self.head[Self::hash_at(buf, ptr)] = ptr as i32;
                    ptr += 1;
                    if ptr >= end {
                        break;
                    }
                }
                self.next_to_update = end;
                m.len = len as isize;
                m.reference = reference;
            }
            reference = self.next(reference);
        }

        for _ in 0..self.max_attempts {
            if reference < floor {
                break;
            }
            if reference < off_i {
                let r = reference as usize;
                let probe = m.len as usize;
                if buf[r + probe] == buf[off + probe] && read_u32(buf, r) == read_u32(buf, off) {
                    let len =
                        MIN_MATCH + common_bytes(buf, r + MIN_MATCH, off + MIN_MATCH, match_limit);
                    if len as isize > m.len {
                        m.reference = reference;
                        m.len = len as isize;
                    }
                }
            }
            reference = self.next(reference);
        }

        m.len != 0
    }

    /// Looks for a match at `off` that, once extended backward down to
    /// `start_limit`, is longer than `min_len`.  On success `m` holds the
    /// widened match.
    pub fn insert_and_find_wider_match(
        &mut self,
        buf: &[u8],
        off: usize,
        start_limit: usize,
        match_limit: usize,
        min_len: isize,
        m: &mut Match,
    ) -> bool {
        m.len = min_len;

        self.insert(buf, off);

        let off_i = off as isize;
        let floor = (off_i - MAX_DISTANCE as isize).max(0);
        let delta = (off - start_limit) as isize;
        let mut reference = self.head_at(buf, off);

        for _ in 0..self.max_attempts {
            if reference < floor {
                break;
            }
            let probe_ref = reference - delta + m.len;
            let probe_cur = start_limit as isize + m.len;
            if reference < off_i && Self::probe_matches(buf, probe_ref, probe_cur) {
                let r = reference as usize;
                if read_u32(buf, r) == read_u32(buf, off) {
                    let forward =
                        MIN_MATCH + common_bytes(buf, r + MIN_MATCH, off + MIN_MATCH, match_limit);
                    let backward = common_bytes_backward(buf, r, off, 0, start_limit);
                    let len = (backward + forward) as isize;
                    if len > m.len {
                        m.len = len;
                        m.reference = reference - backward as isize;
                        m.start = off_i - backward as isize;
                    }
                }
            }
            reference = self.next(reference);
        }

        m.len > min_len
    }

    /// Cheap pre-check: the byte just past the current best length must match.
    #[inline]
    fn probe_matches(buf: &[u8], a: isize, b: isize) -> bool {
        match (usize::try_from(a), usize::try_from(b)) {
            (Ok(a), Ok(b)) => matches!((buf.get(a), buf.get(b)), (Some(x), Some(y)) if x == y),
            _ => false,
        }
    }
}
