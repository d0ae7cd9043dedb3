//! Block-format constants, little-endian helpers, hashing, match counting and
//! the sequence writer shared by the fast and HC compressors.
//!
//! A compressed block is a run of *sequences*.  Each sequence is:
//!
//! ```text
//! token | literal-length extension* | literals | offset (LE u16) | match-length extension*
//! ```
//!
//! The token's high nibble holds the literal run length and its low nibble the
//! match length minus [`MIN_MATCH`].  A nibble equal to 15 is followed by
//! continuation bytes: every `0xFF` adds 255 and means "more follows", the
//! first byte below `0xFF` adds its own value and ends the run.  The last
//! sequence of a block carries literals only.

use crate::error::Lz4Error;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest match the format can encode.
pub const MIN_MATCH: usize = 4;

/// Stride of the decoder's wide literal copy; literal runs ending within this
/// many bytes of the declared output end must be the final run.
pub const COPY_LENGTH: usize = 8;

/// The last bytes of every block are literals.
pub const LAST_LITERALS: usize = 5;

/// A match may not start within this many bytes of the input end.
pub const MF_LIMIT: usize = COPY_LENGTH + MIN_MATCH;

/// Inputs shorter than this are emitted as a single literal run.
pub const MIN_LENGTH: usize = MF_LIMIT + 1;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: usize = (1 << RUN_BITS) - 1;

/// Largest back-reference distance (offsets are stored on two bytes).
pub const MAX_DISTANCE: usize = 65_535;

/// Largest input a single block may hold.
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const KB: usize = 1 << 10;

// ── Hash tables ─────────────────────────────────────────────────────────────

/// Hash bits for inputs that fit in the 64 KB window (16-bit slots).
pub const HASH_LOG_64K: u32 = 12;

/// Hash bits for larger inputs (32-bit slots).
pub const HASH_LOG: u32 = 13;

/// Inputs strictly below this size use the 16-bit position table.
pub const LZ4_64K_LIMIT: usize = 64 * KB + (MF_LIMIT - 1);

/// Growth rate of the search step on inputs that keep failing to match.
pub const SKIP_STRENGTH: u32 = 6;

const PRIME32: u32 = 2_654_435_761;

/// Worst-case compressed size of an `input_len`-byte block.
///
/// Every 255 literal bytes cost one length byte; the constant covers the
/// token and the short tail.
#[inline]
pub fn max_compressed_length(input_len: usize) -> usize {
    input_len
        .saturating_add(input_len / 255)
        .saturating_add(16)
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian reads
// ─────────────────────────────────────────────────────────────────────────────

/// Reads four bytes at `pos` as a little-endian `u32`.
#[inline]
pub fn read_u32(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

#[inline]
pub fn read_u16(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

#[inline]
fn read_u64(buf: &[u8], pos: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[pos..pos + 8]);
    u64::from_le_bytes(word)
}

/// Multiplicative hash of a 4-byte sequence, keeping `hash_log` bits.
#[inline]
pub fn hash4(sequence: u32, hash_log: u32) -> usize {
    (sequence.wrapping_mul(PRIME32) >> (32 - hash_log)) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Match extension
// ─────────────────────────────────────────────────────────────────────────────

/// Counts equal bytes going forward from `reference` and `pos`, stopping
/// before `pos` reaches `limit`.  `reference` must be below `pos`.
///
/// Compares eight bytes at a time while a full word fits before `limit`.
#[inline]
pub fn common_bytes(buf: &[u8], mut reference: usize, mut pos: usize, limit: usize) -> usize {
    let start = pos;
    while pos + 8 <= limit {
        let diff = read_u64(buf, reference) ^ read_u64(buf, pos);
        if diff != 0 {
            return pos - start + (diff.trailing_zeros() / 8) as usize;
        }
        pos += 8;
        reference += 8;
    }
    while pos < limit && buf[reference] == buf[pos] {
        pos += 1;
        reference += 1;
    }
    pos - start
}

/// Counts equal bytes going backward from `reference` and `pos` (exclusive),
/// without crossing `reference_floor` or `pos_floor`.
#[inline]
pub fn common_bytes_backward(
    buf: &[u8],
    mut reference: usize,
    mut pos: usize,
    reference_floor: usize,
    pos_floor: usize,
) -> usize {
    let mut count = 0;
    while reference > reference_floor && pos > pos_floor && buf[reference - 1] == buf[pos - 1] {
        reference -= 1;
        pos -= 1;
        count += 1;
    }
    count
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequence encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Number of continuation bytes needed after a nibble for `len`.
#[inline]
pub fn length_extension_size(len: usize) -> usize {
    if len < RUN_MASK {
        0
    } else {
        (len - RUN_MASK) / 255 + 1
    }
}

/// Writes the continuation bytes for a nibble that saturated at 15.
/// `remaining` is the length left after subtracting the nibble.
#[inline]
fn write_length_extension(dst: &mut [u8], mut op: usize, mut remaining: usize) -> usize {
    while remaining >= 255 {
        dst[op] = 0xFF;
        op += 1;
        remaining -= 255;
    }
    dst[op] = remaining as u8;
    op + 1
}

/// Reads continuation bytes starting at `*ip` and returns their sum.
///
/// Fails with [`Lz4Error::CorruptInput`] if the run leaves `src`.
#[inline]
pub fn read_length_extension(src: &[u8], ip: &mut usize) -> Result<usize, Lz4Error> {
    let mut total = 0usize;
    loop {
        let byte = *src.get(*ip).ok_or(Lz4Error::corrupt(*ip))?;
        *ip += 1;
        total = total
            .checked_add(byte as usize)
            .ok_or(Lz4Error::corrupt(*ip))?;
        if byte != 0xFF {
            return Ok(total);
        }
    }
}

/// Emits one sequence: the literals `src[anchor..start]`, then a match of
/// `match_len` bytes at distance `offset`.  Returns the new output position.
///
/// The exact encoded size is checked against `dst.len()` before anything is
/// written.
pub fn write_sequence(
    src: &[u8],
    anchor: usize,
    start: usize,
    offset: usize,
    match_len: usize,
    dst: &mut [u8],
    mut op: usize,
) -> Result<usize, Lz4Error> {
    debug_assert!((1..=MAX_DISTANCE).contains(&offset));
    debug_assert!(match_len >= MIN_MATCH);

    let lit_len = start - anchor;
    let ml_code = match_len - MIN_MATCH;
    let needed = 1
        + length_extension_size(lit_len)
        + lit_len
        + 2
        + length_extension_size(ml_code);
    if op + needed > dst.len() {
        return Err(Lz4Error::too_small(dst.len()));
    }

    let token_pos = op;
    op += 1;
    let mut token = if lit_len >= RUN_MASK {
        op = write_length_extension(dst, op, lit_len - RUN_MASK);
        (RUN_MASK as u8) << ML_BITS
    } else {
        (lit_len as u8) << ML_BITS
    };

    dst[op..op + lit_len].copy_from_slice(&src[anchor..start]);
    op += lit_len;

    dst[op..op + 2].copy_from_slice(&(offset as u16).to_le_bytes());
    op += 2;

    if ml_code >= ML_MASK {
        token |= ML_MASK as u8;
        op = write_length_extension(dst, op, ml_code - ML_MASK);
    } else {
        token |= ml_code as u8;
    }
    dst[token_pos] = token;
    Ok(op)
}

/// Emits `src[anchor..end]` as the final literal-only sequence.
pub fn write_last_literals(
    src: &[u8],
    anchor: usize,
    end: usize,
    dst: &mut [u8],
    mut op: usize,
) -> Result<usize, Lz4Error> {
    let lit_len = end - anchor;
    let needed = 1 + length_extension_size(lit_len) + lit_len;
    if op + needed > dst.len() {
        return Err(Lz4Error::too_small(dst.len()));
    }

    if lit_len >= RUN_MASK {
        dst[op] = (RUN_MASK as u8) << ML_BITS;
        op = write_length_extension(dst, op + 1, lit_len - RUN_MASK);
    } else {
        dst[op] = (lit_len as u8) << ML_BITS;
        op += 1;
    }
    dst[op..op + lit_len].copy_from_slice(&src[anchor..end]);
    Ok(op + lit_len)
}
