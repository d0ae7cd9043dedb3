//! HC block compressor: lazy parsing over a hash chain.
//!
//! At each position the best match (`match1`) is found, then the parser looks
//! for a wider match starting a little later (`match2`), and another after that
//! (`match3`).  Overlapping candidates are trimmed against each other before
//! the earliest one is committed, which is where most of the ratio gain over
//! the greedy compressor comes from.  `match0` remembers the first match found
//! at the current anchor in case a later candidate skips too far ahead.
//!
//! The thresholds in the parser (3-byte minimum gain, [`OPTIMAL_ML`], the
//! `ML_MASK` clamp) are the long-standing LZ4 HC heuristics and are kept as-is.

use tracing::trace;

use super::search::HashChain;
use super::types::{max_attempts, normalize_level, Match, HC_CLEVEL_DEFAULT, OPTIMAL_ML};
use crate::block::compress::checked_range;
use crate::block::types::{
    max_compressed_length, write_last_literals, write_sequence, LAST_LITERALS, MAX_INPUT_SIZE,
    MF_LIMIT, MIN_LENGTH, MIN_MATCH, ML_MASK,
};
use crate::error::Lz4Error;

const MIN_MATCH_I: isize = MIN_MATCH as isize;

/// Reusable HC compressor owning its hash chain.
///
/// The chain is reset at the start of every call.  Compression takes
/// `&mut self`, so one encoder serves one caller at a time.
pub struct HcEncoder {
    level: i32,
    chain: HashChain,
}

impl Default for HcEncoder {
    fn default() -> Self {
        Self::new(HC_CLEVEL_DEFAULT)
    }
}

impl HcEncoder {
    /// Builds an encoder for `level`, normalised to `1..=17` (values below 1
    /// select the default level 9).
    pub fn new(level: i32) -> Self {
        let level = normalize_level(level);
        HcEncoder {
            level,
            chain: HashChain::new(max_attempts(level)),
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Compresses `src` into `dst` and returns the number of bytes written.
    pub fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
        if src.len() > MAX_INPUT_SIZE {
            return Err(Lz4Error::InvalidArgument("input exceeds maximum block size"));
        }
        self.chain.reset(max_attempts(self.level));
        let written = compress_lazy(&mut self.chain, src, dst)?;
        trace!(level = self.level, input = src.len(), written, "hc block compressed");
        Ok(written)
    }
}

#[inline]
fn encode(
    src: &[u8],
    anchor: &mut isize,
    m: &Match,
    dst: &mut [u8],
    op: usize,
) -> Result<usize, Lz4Error> {
    let op = write_sequence(
        src,
        *anchor as usize,
        m.start as usize,
        (m.start - m.reference) as usize,
        m.len as usize,
        dst,
        op,
    )?;
    *anchor = m.end();
    Ok(op)
}

fn compress_lazy(chain: &mut HashChain, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    let mut op = 0;
    if src.len() < MIN_LENGTH {
        return write_last_literals(src, 0, src.len(), dst, op);
    }

    let src_end = src.len() as isize;
    let mf_limit = src_end - MF_LIMIT as isize;
    let match_limit = src.len() - LAST_LITERALS;

    let mut anchor: isize = 0;
    let mut s_off: isize = 1;

    let mut m0 = Match::default();
    let mut m1 = Match::default();
    let mut m2 = Match::default();
    let mut m3 = Match::default();

    'main: while s_off < mf_limit {
        if !chain.insert_and_find_best_match(src, s_off as usize, match_limit, &mut m1) {
            s_off += 1;
            continue;
        }

        // Kept in case a later candidate skips too far.
        m0 = m1;

        'search2: loop {
            if m1.end() >= mf_limit
                || !chain.insert_and_find_wider_match(
                    src,
                    (m1.end() - 2) as usize,
                    (m1.start + 1) as usize,
                    match_limit,
                    m1.len,
                    &mut m2,
                )
            {
                // No better match: commit match1.
                op = encode(src, &mut anchor, &m1, dst, op)?;
                s_off = anchor;
                continue 'main;
            }

            if m0.start < m1.start && m2.start < m1.start + m0.len {
                m1 = m0;
            }

            // match1 too short to be worth a sequence.
            if m2.start - m1.start < 3 {
                m1 = m2;
                continue 'search2;
            }

            'search3: loop {
                if m2.start - m1.start < OPTIMAL_ML {
                    let mut new_len = m1.len.min(OPTIMAL_ML);
                    if m1.start + new_len > m2.end() - MIN_MATCH_I {
                        new_len = m2.start - m1.start + m2.len - MIN_MATCH_I;
                    }
                    let correction = new_len - (m2.start - m1.start);
                    if correction > 0 {
                        m2.fix(correction);
                    }
                }

                if m2.end() >= mf_limit
                    || !chain.insert_and_find_wider_match(
                        src,
                        (m2.end() - 3) as usize,
                        m2.start as usize,
                        match_limit,
                        m2.len,
                        &mut m3,
                    )
                {
                    // No better match: commit match1 and match2.
                    if m2.start < m1.end() {
                        m1.len = m2.start - m1.start;
                    }
                    op = encode(src, &mut anchor, &m1, dst, op)?;
                    op = encode(src, &mut anchor, &m2, dst, op)?;
                    s_off = anchor;
                    continue 'main;
                }

                if m3.start < m1.end() + 3 {
                    // No room for match2.
                    if m3.start >= m1.end() {
                        // match1 can be written now; match3 takes its place.
                        if m2.start < m1.end() {
                            let correction = m1.end() - m2.start;
                            m2.fix(correction);
                            if m2.len < MIN_MATCH_I {
                                m2 = m3;
                            }
                        }

                        op = encode(src, &mut anchor, &m1, dst, op)?;
                        s_off = anchor;

                        m1 = m3;
                        m0 = m2;
                        continue 'search2;
                    }

                    m2 = m3;
                    continue 'search3;
                }

                // Three ascending matches: write at least the first.
                if m2.start < m1.end() {
                    if m2.start - m1.start < ML_MASK as isize {
                        if m1.len > OPTIMAL_ML {
                            m1.len = OPTIMAL_ML;
                        }
                        if m1.end() > m2.end() - MIN_MATCH_I {
                            m1.len = m2.end() - m1.start - MIN_MATCH_I;
                        }
                        let correction = m1.end() - m2.start;
                        m2.fix(correction);
                    } else {
                        m1.len = m2.start - m1.start;
                    }
                }

                op = encode(src, &mut anchor, &m1, dst, op)?;
                s_off = anchor;

                m1 = m2;
                m2 = m3;
            }
        }
    }

    write_last_literals(src, anchor as usize, src.len(), dst, op)
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses `src` into `dst` at HC `level`.
pub fn compress_hc(src: &[u8], dst: &mut [u8], level: i32) -> Result<usize, Lz4Error> {
    HcEncoder::new(level).compress(src, dst)
}

/// Offset/length form of [`compress_hc`].  Arguments are validated before
/// either buffer is touched.
pub fn compress_hc_into(
    src: &[u8],
    src_off: usize,
    src_len: usize,
    dst: &mut [u8],
    dst_off: usize,
    max_dst_len: usize,
    level: i32,
) -> Result<usize, Lz4Error> {
    let input = checked_range(src.len(), src_off, src_len, "source range out of bounds")?;
    let output = checked_range(dst.len(), dst_off, max_dst_len, "destination range out of bounds")?;
    compress_hc(&src[input], &mut dst[output], level)
}

/// Compresses `src` at HC `level` into an exactly-sized vector.
pub fn compress_hc_to_vec(src: &[u8], level: i32) -> Result<Vec<u8>, Lz4Error> {
    let mut dst = vec![0u8; max_compressed_length(src.len())];
    let written = compress_hc(src, &mut dst, level)?;
    dst.truncate(written);
    Ok(dst)
}
