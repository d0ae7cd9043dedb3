//! Fast block compressor: single-pass greedy parsing over one flat hash table.
//!
//! | Function                     | Behaviour                                              |
//! |------------------------------|--------------------------------------------------------|
//! | [`compress`]                 | compress `src` into `dst`, returns the encoded length  |
//! | [`compress_fast`]            | same, with an acceleration factor                      |
//! | [`compress_into`]            | offset/length form, arguments validated up front       |
//! | [`compress_with_prefix`]     | compress the tail of a buffer, matching into its head  |
//! | [`compress_to_vec`]          | allocate a bound-sized buffer and compress into it     |
//! | [`FastEncoder`]              | owns the hash tables so repeated calls reuse them      |
//!
//! Inputs below [`LZ4_64K_LIMIT`] use a table of 16-bit positions; every
//! position in such an input is within the 64 KB window, so no distance check
//! is made.  Larger inputs store 32-bit positions biased by 64 KB, which makes
//! an empty (zero) slot decode to a position outside the window.
//!
//! Running out of destination room is reported as
//! [`Lz4Error::DestinationTooSmall`] before the offending sequence is written.

use tracing::trace;

use super::types::{
    common_bytes, hash4, read_u32, write_last_literals, write_sequence, HASH_LOG, HASH_LOG_64K,
    KB, LAST_LITERALS, LZ4_64K_LIMIT, MAX_DISTANCE, MAX_INPUT_SIZE, MF_LIMIT, MIN_LENGTH,
    MIN_MATCH, SKIP_STRENGTH,
};
use crate::error::Lz4Error;

/// Default acceleration: probe every position until the skip heuristic kicks in.
pub const ACCELERATION_DEFAULT: u32 = 1;

/// Largest accepted acceleration factor.
pub const ACCELERATION_MAX: u32 = 65_537;

/// Bias added to positions stored in the 32-bit table.
const WINDOW_BIAS: usize = 64 * KB;

// ─────────────────────────────────────────────────────────────────────────────
// Position tables
// ─────────────────────────────────────────────────────────────────────────────

/// A hash → most-recent-position index.
trait PositionTable {
    const HASH_LOG: u32;

    #[inline]
    fn hash(sequence: u32) -> usize {
        hash4(sequence, Self::HASH_LOG)
    }

    /// Stores `pos` in slot `h`.
    fn insert(&mut self, h: usize, pos: usize);

    /// Stores `pos` in slot `h` and returns the previous occupant if it lies
    /// within [`MAX_DISTANCE`] bytes before `pos`.
    fn replace(&mut self, h: usize, pos: usize) -> Option<usize>;
}

struct Table16 {
    slots: Vec<u16>,
}

impl Table16 {
    fn new() -> Self {
        Table16 {
            slots: vec![0; 1 << HASH_LOG_64K],
        }
    }
}

impl PositionTable for Table16 {
    const HASH_LOG: u32 = HASH_LOG_64K;

    #[inline]
    fn insert(&mut self, h: usize, pos: usize) {
        self.slots[h] = pos as u16;
    }

    #[inline]
    fn replace(&mut self, h: usize, pos: usize) -> Option<usize> {
        let previous = self.slots[h] as usize;
        self.slots[h] = pos as u16;
        (previous < pos).then_some(previous)
    }
}

struct Table32 {
    slots: Vec<u32>,
}

impl Table32 {
    fn new() -> Self {
        Table32 {
            slots: vec![0; 1 << HASH_LOG],
        }
    }
}

impl PositionTable for Table32 {
    const HASH_LOG: u32 = HASH_LOG;

    #[inline]
    fn insert(&mut self, h: usize, pos: usize) {
        self.slots[h] = (pos + WINDOW_BIAS) as u32;
    }

    #[inline]
    fn replace(&mut self, h: usize, pos: usize) -> Option<usize> {
        let stored = self.slots[h] as usize;
        self.slots[h] = (pos + WINDOW_BIAS) as u32;
        let biased = pos + WINDOW_BIAS;
        if stored < biased && biased - stored <= MAX_DISTANCE {
            Some(stored - WINDOW_BIAS)
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Reusable fast compressor.
///
/// Owns both position tables.  They are cleared at the start of every call,
/// so no position from one input can be matched against another.  Compression
/// takes `&mut self`; share an encoder between threads only by moving it.
pub struct FastEncoder {
    acceleration: u32,
    table16: Table16,
    table32: Table32,
}

impl Default for FastEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FastEncoder {
    pub fn new() -> Self {
        Self::with_acceleration(ACCELERATION_DEFAULT)
    }

    /// Builds an encoder trading ratio for speed.  Values are clamped to
    /// `1..=ACCELERATION_MAX`.
    pub fn with_acceleration(acceleration: u32) -> Self {
        FastEncoder {
            acceleration: acceleration.clamp(ACCELERATION_DEFAULT, ACCELERATION_MAX),
            table16: Table16::new(),
            table32: Table32::new(),
        }
    }

    pub fn acceleration(&self) -> u32 {
        self.acceleration
    }

    /// Compresses `src` into `dst` and returns the number of bytes written.
    pub fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
        self.compress_with_prefix(src, 0, dst)
    }

    /// Compresses `buf[prefix_len..]`.  Matches may refer back into
    /// `buf[..prefix_len]` (only its last 64 KB are reachable).
    pub fn compress_with_prefix(
        &mut self,
        buf: &[u8],
        prefix_len: usize,
        dst: &mut [u8],
    ) -> Result<usize, Lz4Error> {
        if prefix_len > buf.len() {
            return Err(Lz4Error::InvalidArgument("prefix longer than buffer"));
        }
        if buf.len() - prefix_len > MAX_INPUT_SIZE {
            return Err(Lz4Error::InvalidArgument("input exceeds maximum block size"));
        }

        // Only the last window of the prefix can be referenced.
        let skip = prefix_len.saturating_sub(MAX_DISTANCE);
        let buf = &buf[skip..];
        let start = prefix_len - skip;

        if buf.len() < LZ4_64K_LIMIT {
            self.table16.slots.fill(0);
            load_prefix(&mut self.table16, buf, start);
            compress_generic(&mut self.table16, buf, start, dst, self.acceleration)
        } else {
            self.table32.slots.fill(0);
            load_prefix(&mut self.table32, buf, start);
            compress_generic(&mut self.table32, buf, start, dst, self.acceleration)
        }
    }
}

/// Indexes every third position of the prefix.
fn load_prefix<T: PositionTable>(table: &mut T, buf: &[u8], prefix_len: usize) {
    if prefix_len < MIN_MATCH {
        return;
    }
    let mut pos = 0;
    while pos + MIN_MATCH <= prefix_len {
        table.insert(T::hash(read_u32(buf, pos)), pos);
        pos += 3;
    }
}

/// Greedy parse of `buf[start..]`.
fn compress_generic<T: PositionTable>(
    table: &mut T,
    buf: &[u8],
    start: usize,
    dst: &mut [u8],
    acceleration: u32,
) -> Result<usize, Lz4Error> {
    let src_end = buf.len();
    let mut anchor = start;
    let mut op = 0;

    if src_end - start < MIN_LENGTH {
        return write_last_literals(buf, anchor, src_end, dst, op);
    }

    let mf_limit = src_end - MF_LIMIT;
    let match_limit = src_end - LAST_LITERALS;

    let mut ip = start;
    table.insert(T::hash(read_u32(buf, ip)), ip);
    ip += 1;
    let mut forward_h = T::hash(read_u32(buf, ip));

    'search: loop {
        // Probe with a step that grows while nothing matches.
        let mut forward_ip = ip;
        let mut attempts = (acceleration as usize) << SKIP_STRENGTH;
        let mut reference = loop {
            let h = forward_h;
            ip = forward_ip;
            let step = attempts >> SKIP_STRENGTH;
            attempts += 1;
            forward_ip = ip + step;
            if forward_ip > mf_limit {
                break 'search;
            }
            forward_h = T::hash(read_u32(buf, forward_ip));
            if let Some(c) = table.replace(h, ip) {
                if read_u32(buf, c) == read_u32(buf, ip) {
                    break c;
                }
            }
        };

        // Catch up: grow the match backward over the pending literals.
        while ip > anchor && reference > 0 && buf[ip - 1] == buf[reference - 1] {
            ip -= 1;
            reference -= 1;
        }

        loop {
            let match_len =
                MIN_MATCH + common_bytes(buf, reference + MIN_MATCH, ip + MIN_MATCH, match_limit);
            op = write_sequence(buf, anchor, ip, ip - reference, match_len, dst, op)?;
            ip += match_len;
            anchor = ip;

            if ip > mf_limit {
                break 'search;
            }

            table.insert(T::hash(read_u32(buf, ip - 2)), ip - 2);

            // A match directly after this one is emitted with no literals.
            let h = T::hash(read_u32(buf, ip));
            match table.replace(h, ip) {
                Some(c) if read_u32(buf, c) == read_u32(buf, ip) => reference = c,
                _ => break,
            }
        }

        ip += 1;
        forward_h = T::hash(read_u32(buf, ip));
    }

    let written = write_last_literals(buf, anchor, src_end, dst, op)?;
    trace!(input = src_end - start, written, "fast block compressed");
    Ok(written)
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses `src` into `dst` with the default acceleration.
///
/// `dst` should hold at least [`max_compressed_length`](super::max_compressed_length)`(src.len())`
/// bytes; a smaller buffer fails with [`Lz4Error::DestinationTooSmall`] when
/// the encoding does not fit.
pub fn compress(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    FastEncoder::new().compress(src, dst)
}

pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: u32) -> Result<usize, Lz4Error> {
    FastEncoder::with_acceleration(acceleration).compress(src, dst)
}

/// Compresses `src[src_off..src_off + src_len]` into
/// `dst[dst_off..dst_off + max_dst_len]`.
///
/// Offsets and lengths are validated before either buffer is touched.
pub fn compress_into(
    src: &[u8],
    src_off: usize,
    src_len: usize,
    dst: &mut [u8],
    dst_off: usize,
    max_dst_len: usize,
) -> Result<usize, Lz4Error> {
    let input = checked_range(src.len(), src_off, src_len, "source range out of bounds")?;
    let output = checked_range(dst.len(), dst_off, max_dst_len, "destination range out of bounds")?;
    compress(&src[input], &mut dst[output])
}

/// Compresses `buf[prefix_len..]` using `buf[..prefix_len]` as history.
pub fn compress_with_prefix(
    buf: &[u8],
    prefix_len: usize,
    dst: &mut [u8],
) -> Result<usize, Lz4Error> {
    FastEncoder::new().compress_with_prefix(buf, prefix_len, dst)
}

/// Compresses `src` into a freshly allocated, exactly-sized vector.
pub fn compress_to_vec(src: &[u8]) -> Result<Vec<u8>, Lz4Error> {
    let mut dst = vec![0u8; super::max_compressed_length(src.len())];
    let written = compress(src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}

/// Validates `off..off + len` against a buffer of `buf_len` bytes.
pub(crate) fn checked_range(
    buf_len: usize,
    off: usize,
    len: usize,
    what: &'static str,
) -> Result<core::ops::Range<usize>, Lz4Error> {
    match off.checked_add(len) {
        Some(end) if end <= buf_len => Ok(off..end),
        _ => Err(Lz4Error::InvalidArgument(what)),
    }
}
