//! Blocks carrying their decoded length.
//!
//! Layout: a 4-byte little-endian original length, then the compressed block.
//! Decoding uses the trusting decoder since the length is known exactly.

use super::compress::{checked_range, FastEncoder};
use super::decompress_api::decompress_fast;
use super::types::{max_compressed_length, MAX_INPUT_SIZE};
use crate::error::Lz4Error;

pub const SIZE_PREFIX_LEN: usize = 4;

/// Worst-case size of a size-prefixed block.
pub fn max_prefixed_length(input_len: usize) -> usize {
    max_compressed_length(input_len).saturating_add(SIZE_PREFIX_LEN)
}

/// Compresses `src` into `dst` behind a 4-byte length header.
pub fn compress_prepend_size_into(
    encoder: &mut FastEncoder,
    src: &[u8],
    dst: &mut [u8],
) -> Result<usize, Lz4Error> {
    if src.len() > MAX_INPUT_SIZE {
        return Err(Lz4Error::InvalidArgument("input exceeds maximum block size"));
    }
    if dst.len() < SIZE_PREFIX_LEN {
        return Err(Lz4Error::DestinationTooSmall {
            needed: Some(SIZE_PREFIX_LEN + 1),
            capacity: dst.len(),
        });
    }
    dst[..SIZE_PREFIX_LEN].copy_from_slice(&(src.len() as u32).to_le_bytes());
    let written = encoder.compress(src, &mut dst[SIZE_PREFIX_LEN..])?;
    Ok(SIZE_PREFIX_LEN + written)
}

/// Compresses `src` into a new vector behind a 4-byte length header.
pub fn compress_prepend_size(src: &[u8]) -> Result<Vec<u8>, Lz4Error> {
    let mut dst = vec![0u8; max_prefixed_length(src.len())];
    let written = compress_prepend_size_into(&mut FastEncoder::new(), src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}

/// Reads the length header of a size-prefixed block.
pub fn decoded_length(src: &[u8]) -> Result<usize, Lz4Error> {
    checked_range(src.len(), 0, SIZE_PREFIX_LEN, "input shorter than size prefix")?;
    let len = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;
    if len > MAX_INPUT_SIZE {
        return Err(Lz4Error::corrupt(0));
    }
    Ok(len)
}

/// Decodes a size-prefixed block.  The block must occupy all of `src`.
pub fn decompress_size_prepended(src: &[u8]) -> Result<Vec<u8>, Lz4Error> {
    let len = decoded_length(src)?;
    // One compressed byte expands to at most 255 decoded bytes.
    if len > (src.len() - SIZE_PREFIX_LEN).saturating_mul(255) {
        return Err(Lz4Error::corrupt(0));
    }
    let mut out = vec![0u8; len];
    let consumed = decompress_fast(&src[SIZE_PREFIX_LEN..], &mut out)
        .map_err(|e| shift_offset(e, SIZE_PREFIX_LEN))?;
    if SIZE_PREFIX_LEN + consumed != src.len() {
        return Err(Lz4Error::corrupt(SIZE_PREFIX_LEN + consumed));
    }
    Ok(out)
}

fn shift_offset(err: Lz4Error, by: usize) -> Lz4Error {
    match err {
        Lz4Error::CorruptInput { offset } => Lz4Error::corrupt(offset + by),
        other => other,
    }
}
