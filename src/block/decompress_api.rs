//! Public block decompression API.
//!
//! | Function                               | Mode      | Returns              |
//! |----------------------------------------|-----------|----------------------|
//! | [`decompress`]                         | defensive | bytes produced       |
//! | [`decompress_into`]                    | defensive | bytes produced       |
//! | [`decompress_to_vec`]                  | defensive | decoded vector       |
//! | [`decompress_fast`]                    | trusting  | source bytes read    |
//! | [`decompress_fast_into`]               | trusting  | source bytes read    |
//! | [`decompress_fast_with_prefix64k`]     | trusting  | source bytes read    |
//!
//! The defensive functions take the exact compressed length and an upper bound
//! on the output.  The trusting functions take the exact decoded length and
//! read only as much source as the block needs; use them when the length is
//! stored out of band (a container header, a size prefix).

use super::compress::checked_range;
use super::decompress_core::{decode_block, OutputLimit};
use super::types::MAX_DISTANCE;
use crate::error::Lz4Error;

/// Decodes the whole of `src` into `dst`, which bounds the output size.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    let capacity = dst.len();
    decode_block(src, dst, 0, 0, OutputLimit::Capacity(capacity)).map(|d| d.produced)
}

/// Decodes `src[src_off..src_off + src_len]` into
/// `dst[dst_off..dst_off + max_dest_len]`.
pub fn decompress_into(
    src: &[u8],
    src_off: usize,
    src_len: usize,
    dst: &mut [u8],
    dst_off: usize,
    max_dest_len: usize,
) -> Result<usize, Lz4Error> {
    let input = checked_range(src.len(), src_off, src_len, "source range out of bounds")?;
    checked_range(dst.len(), dst_off, max_dest_len, "destination range out of bounds")?;
    decode_block(
        &src[input],
        dst,
        dst_off,
        dst_off,
        OutputLimit::Capacity(max_dest_len),
    )
    .map(|d| d.produced)
}

/// Decodes `src` into a new vector of at most `max_len` bytes.
pub fn decompress_to_vec(src: &[u8], max_len: usize) -> Result<Vec<u8>, Lz4Error> {
    let mut out = vec![0u8; max_len];
    let produced = decompress(src, &mut out)?;
    out.truncate(produced);
    Ok(out)
}

/// Decodes exactly `dst.len()` bytes and returns how many bytes of `src`
/// the block occupied.
pub fn decompress_fast(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
    let len = dst.len();
    decode_block(src, dst, 0, 0, OutputLimit::Exact(len)).map(|d| d.consumed)
}

/// Decodes exactly `dest_len` bytes into `dst[dst_off..]` from the block at
/// `src[src_off..]`.  Returns the compressed length of that block.
pub fn decompress_fast_into(
    src: &[u8],
    src_off: usize,
    dst: &mut [u8],
    dst_off: usize,
    dest_len: usize,
) -> Result<usize, Lz4Error> {
    if src_off > src.len() {
        return Err(Lz4Error::InvalidArgument("source offset out of bounds"));
    }
    checked_range(dst.len(), dst_off, dest_len, "destination range out of bounds")?;
    decode_block(&src[src_off..], dst, dst_off, dst_off, OutputLimit::Exact(dest_len))
        .map(|d| d.consumed)
}

/// Like [`decompress_fast_into`], but matches may also reach the up to 64 KB
/// of `dst` that precede `dst_off`, typically the previous block of a stream.
pub fn decompress_fast_with_prefix64k(
    src: &[u8],
    src_off: usize,
    dst: &mut [u8],
    dst_off: usize,
    dest_len: usize,
) -> Result<usize, Lz4Error> {
    if src_off > src.len() {
        return Err(Lz4Error::InvalidArgument("source offset out of bounds"));
    }
    checked_range(dst.len(), dst_off, dest_len, "destination range out of bounds")?;
    let window_start = dst_off.saturating_sub(MAX_DISTANCE);
    decode_block(
        &src[src_off..],
        dst,
        dst_off,
        window_start,
        OutputLimit::Exact(dest_len),
    )
    .map(|d| d.consumed)
}
