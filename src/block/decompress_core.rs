//! Block decoder shared by the trusting and defensive entry points.
//!
//! Both modes walk the same per-sequence state machine:
//!
//! ```text
//! token → literal-length extension? → literals → offset → match-length extension? → match copy
//! ```
//!
//! They differ only in how the block end is recognised:
//!
//! - [`OutputLimit::Exact`] (trusting): the caller knows the decoded size.
//!   Decoding stops once a literal-only run lands exactly on it; the source
//!   may continue past the block.
//! - [`OutputLimit::Capacity`] (defensive): the caller knows the compressed
//!   size.  Decoding stops when a literal run ends exactly at the end of the
//!   source; the output may be shorter than the capacity.
//!
//! Every read and write is bounds-checked; malformed input yields
//! [`Lz4Error::CorruptInput`] carrying the source offset of the bad field.

use super::types::{
    read_length_extension, read_u16, COPY_LENGTH, LAST_LITERALS, MIN_MATCH, ML_MASK, RUN_MASK,
};
use crate::error::Lz4Error;

/// How the end of a block is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLimit {
    /// Exactly this many bytes must be produced.
    Exact(usize),
    /// At most this many bytes may be produced; the source length is exact.
    Capacity(usize),
}

/// Result of decoding one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Source bytes consumed, including the final literal run.
    pub consumed: usize,
    /// Bytes written starting at the output position.
    pub produced: usize,
}

/// Decodes one block from `src` into `dst[dst_start..]`.
///
/// Matches may reference any byte of `dst` from `window_start` up to the
/// current output position, which lets a caller expose already-decoded data
/// as history.  `window_start <= dst_start` and `dst_start + limit <= dst.len()`
/// are the caller's responsibility.
pub fn decode_block(
    src: &[u8],
    dst: &mut [u8],
    dst_start: usize,
    window_start: usize,
    limit: OutputLimit,
) -> Result<Decoded, Lz4Error> {
    debug_assert!(window_start <= dst_start);

    let (dst_end, exact) = match limit {
        OutputLimit::Exact(len) => (dst_start + len, true),
        OutputLimit::Capacity(len) => (dst_start + len, false),
    };
    debug_assert!(dst_end <= dst.len());

    if dst_end == dst_start {
        // An empty block is the single token 0x00.
        return match src.first() {
            Some(0) if exact || src.len() == 1 => Ok(Decoded {
                consumed: 1,
                produced: 0,
            }),
            _ => Err(Lz4Error::corrupt(0)),
        };
    }

    let mut ip = 0usize;
    let mut op = dst_start;
    let mut after_match = false;

    loop {
        // ── Token and literal run ───────────────────────────────────────────
        let token_pos = ip;
        let token = *src.get(ip).ok_or(Lz4Error::corrupt(ip))? as usize;
        ip += 1;

        let mut lit_len = token >> 4;
        if lit_len == RUN_MASK {
            lit_len += read_length_extension(src, &mut ip)?;
        }
        let lit_src_end = ip.checked_add(lit_len).ok_or(Lz4Error::corrupt(token_pos))?;
        let lit_dst_end = op.checked_add(lit_len).ok_or(Lz4Error::corrupt(token_pos))?;

        let is_last = if exact {
            // Only the final run may end inside the last copy stride.
            if lit_dst_end > dst_end.saturating_sub(COPY_LENGTH) {
                if lit_dst_end != dst_end {
                    return Err(Lz4Error::corrupt(token_pos));
                }
                true
            } else {
                false
            }
        } else {
            lit_src_end == src.len()
        };

        if lit_src_end > src.len() {
            return Err(Lz4Error::corrupt(ip));
        }
        if lit_dst_end > dst_end {
            return Err(overflow(exact, token_pos, dst_end - dst_start));
        }

        dst[op..lit_dst_end].copy_from_slice(&src[ip..lit_src_end]);
        ip = lit_src_end;
        op = lit_dst_end;

        if is_last {
            if after_match && lit_len < LAST_LITERALS {
                return Err(Lz4Error::corrupt(token_pos));
            }
            return Ok(Decoded {
                consumed: ip,
                produced: op - dst_start,
            });
        }

        // ── Offset ──────────────────────────────────────────────────────────
        let offset_pos = ip;
        if ip + 2 > src.len() {
            return Err(Lz4Error::corrupt(ip));
        }
        let offset = read_u16(src, ip) as usize;
        ip += 2;
        if offset == 0 || offset > op - window_start {
            return Err(Lz4Error::corrupt(offset_pos));
        }

        // ── Match ───────────────────────────────────────────────────────────
        let mut match_len = token & ML_MASK;
        if match_len == ML_MASK {
            match_len += read_length_extension(src, &mut ip)?;
        }
        match_len = match_len
            .checked_add(MIN_MATCH)
            .ok_or(Lz4Error::corrupt(offset_pos))?;
        let match_end = op.checked_add(match_len).ok_or(Lz4Error::corrupt(offset_pos))?;

        if exact {
            // The literal tail still has to fit after this match.
            if match_end + LAST_LITERALS > dst_end {
                return Err(Lz4Error::corrupt(offset_pos));
            }
        } else if match_end > dst_end {
            return Err(overflow(exact, offset_pos, dst_end - dst_start));
        }

        copy_match(dst, op, offset, match_len);
        op = match_end;
        after_match = true;
    }
}

/// A copy that does not fit the output: corruption when the size was declared
/// exact, a too-small destination otherwise.
#[inline]
fn overflow(exact: bool, pos: usize, capacity: usize) -> Lz4Error {
    if exact {
        Lz4Error::corrupt(pos)
    } else {
        Lz4Error::too_small(capacity)
    }
}

/// Copies `len` bytes from `op - offset` to `op`.
///
/// When the regions overlap the bytes being produced are part of the source,
/// so the copy advances in strides of at most `offset` bytes.
#[inline]
pub fn copy_match(dst: &mut [u8], op: usize, offset: usize, len: usize) {
    let from = op - offset;
    if offset >= len {
        dst.copy_within(from..from + len, op);
    } else if offset == 1 {
        let byte = dst[from];
        dst[op..op + len].fill(byte);
    } else {
        let mut copied = 0;
        while copied < len {
            let chunk = offset.min(len - copied);
            dst.copy_within(from + copied..from + copied + chunk, op + copied);
            copied += chunk;
        }
    }
}
