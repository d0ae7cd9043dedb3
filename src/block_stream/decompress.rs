//! Block-stream reader.

use tracing::{debug, trace};

use super::types::{
    BlockHeader, BlockStreamCause, BlockStreamError, CHECKSUM_MASK, CHECKSUM_SEED,
    HEADER_LENGTH, MAGIC_LENGTH, METHOD_LZ4, METHOD_RAW,
};
use crate::block::decompress_api::decompress_fast_into;
use crate::xxhash::{StreamingChecksum, XxHash32};

/// Reads "LZ4Block" records.
///
/// With `stop_on_empty_block` set (the default) decoding ends at the first
/// end mark and a missing end mark is an error.  Cleared, end marks are
/// skipped so concatenated streams decode as one, and decoding ends where the
/// input does.
pub struct BlockStreamDecoder<C: StreamingChecksum = XxHash32> {
    stop_on_empty_block: bool,
    _checksum: std::marker::PhantomData<C>,
}

impl BlockStreamDecoder<XxHash32> {
    pub fn new() -> Self {
        Self::with_checksum()
    }
}

impl Default for BlockStreamDecoder<XxHash32> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamingChecksum> BlockStreamDecoder<C> {
    pub fn with_checksum() -> Self {
        BlockStreamDecoder {
            stop_on_empty_block: true,
            _checksum: std::marker::PhantomData,
        }
    }

    pub fn stop_on_empty_block(mut self, stop: bool) -> Self {
        self.stop_on_empty_block = stop;
        self
    }

    pub fn decode(&self, src: &[u8]) -> Result<Vec<u8>, BlockStreamError> {
        let mut out = Vec::new();
        self.decode_into(src, &mut out)?;
        Ok(out)
    }

    /// Appends the decoded content of `src` to `out`.  Returns the number of
    /// input bytes read; with `stop_on_empty_block` set, bytes after the
    /// first end mark are left unread.
    pub fn decode_into(&self, src: &[u8], out: &mut Vec<u8>) -> Result<usize, BlockStreamError> {
        let mut pos = 0;
        loop {
            if pos == src.len() && !self.stop_on_empty_block {
                return Ok(pos);
            }
            let available = src.len() - pos;
            if available < HEADER_LENGTH {
                return Err(truncated(pos, HEADER_LENGTH - available));
            }
            let header = BlockHeader::read(&src[pos..])
                .ok_or_else(|| BlockStreamError::corrupted(pos, BlockStreamCause::BadMagic))?;
            validate(&header, pos)?;
            let body = pos + HEADER_LENGTH;

            if header.is_end_mark() {
                pos = body;
                if self.stop_on_empty_block {
                    debug!(offset = pos, "block stream end mark");
                    return Ok(pos);
                }
                continue;
            }

            let compressed_len = header.compressed_len as usize;
            let original_len = header.original_len as usize;
            if src.len() - body < compressed_len {
                return Err(truncated(body, compressed_len - (src.len() - body)));
            }
            let block = &src[body..body + compressed_len];
            let start = out.len();
            if header.method == METHOD_RAW {
                out.extend_from_slice(block);
            } else {
                out.resize(start + original_len, 0);
                let consumed = decompress_fast_into(block, 0, out, start, original_len)
                    .map_err(|source| {
                        BlockStreamError::corrupted(body, BlockStreamCause::Block { source })
                    })?;
                if consumed != compressed_len {
                    return Err(BlockStreamError::corrupted(
                        body,
                        BlockStreamCause::CompressedLength {
                            declared: compressed_len,
                            consumed,
                        },
                    ));
                }
            }

            let computed = C::oneshot(&out[start..], CHECKSUM_SEED) & CHECKSUM_MASK;
            if computed != header.checksum {
                return Err(BlockStreamError::corrupted(
                    pos + MAGIC_LENGTH + 9,
                    BlockStreamCause::Checksum {
                        stored: header.checksum,
                        computed,
                    },
                ));
            }
            trace!(offset = pos, compressed_len, original_len, "block stream record");
            pos = body + compressed_len;
        }
    }
}

fn truncated(offset: usize, needed: usize) -> BlockStreamError {
    BlockStreamError::corrupted(offset, BlockStreamCause::Truncated { needed })
}

fn validate(header: &BlockHeader, pos: usize) -> Result<(), BlockStreamError> {
    let token_pos = pos + MAGIC_LENGTH;
    if header.method != METHOD_RAW && header.method != METHOD_LZ4 {
        return Err(BlockStreamError::corrupted(
            token_pos,
            BlockStreamCause::UnknownMethod(header.method),
        ));
    }
    let (compressed, original) = (header.compressed_len, header.original_len);
    let max = header.max_original_len();
    if original > 0 && original as usize > max {
        return Err(BlockStreamError::corrupted(
            token_pos,
            BlockStreamCause::BlockTooLarge { original, max },
        ));
    }
    let inconsistent = original < 0
        || compressed < 0
        || (original == 0) != (compressed == 0)
        || (header.method == METHOD_RAW && original != compressed);
    if inconsistent {
        return Err(BlockStreamError::corrupted(
            token_pos + 1,
            BlockStreamCause::InvalidLengths {
                compressed,
                original,
            },
        ));
    }
    if header.is_end_mark() && header.checksum != 0 {
        return Err(BlockStreamError::corrupted(
            token_pos + 9,
            BlockStreamCause::EndMarkChecksum(header.checksum),
        ));
    }
    Ok(())
}

/// Decodes a stream up to its first end mark.
pub fn decompress_block_stream(src: &[u8]) -> Result<Vec<u8>, BlockStreamError> {
    BlockStreamDecoder::new().decode(src)
}
