//! LZ4 frame decompression.
//!
//! [`FrameDecoder`] walks a buffer holding one or more frames, skipping
//! skippable frames and appending the content of the others.  Every error
//! carries the offset of the offending field relative to the start of the
//! buffer.

use tracing::{debug, trace};

use super::header::{parse_header, read_le32, require};
use super::types::{
    BlockChecksum, ContentChecksum, CorruptionCause, FrameError, FrameInfo, FrameType, BF_SIZE,
    BH_SIZE, CHECKSUM_SIZE, LZ4F_BLOCK_UNCOMPRESSED_FLAG,
};
use crate::block::decompress_api::decompress_into;
use crate::xxhash::{StreamingChecksum, XxHash32};

/// Frame reader.
pub struct FrameDecoder<C: StreamingChecksum = XxHash32> {
    verify_checksums: bool,
    _checksum: std::marker::PhantomData<C>,
}

impl Default for FrameDecoder<XxHash32> {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder<XxHash32> {
    pub fn new() -> Self {
        Self::with_checksum()
    }
}

impl<C: StreamingChecksum> FrameDecoder<C> {
    /// Decoder using checksum implementation `C`.
    pub fn with_checksum() -> Self {
        FrameDecoder {
            verify_checksums: true,
            _checksum: std::marker::PhantomData,
        }
    }

    /// Turns block and content checksum verification on or off.  The header
    /// checksum is always verified.
    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Decodes every frame in `src` and returns the concatenated content.
    pub fn decode(&self, src: &[u8]) -> Result<Vec<u8>, FrameError> {
        let mut out = Vec::new();
        self.decode_into(src, &mut out)?;
        Ok(out)
    }

    /// Decodes every frame in `src`, appending the content to `out`.
    /// Returns the number of bytes appended.
    ///
    /// An empty `src` is truncated input, not an empty stream.
    pub fn decode_into(&self, src: &[u8], out: &mut Vec<u8>) -> Result<usize, FrameError> {
        let start = out.len();
        let mut pos = 0;
        loop {
            pos += self.decode_frame(src, pos, out)?;
            if pos == src.len() {
                break;
            }
        }
        Ok(out.len() - start)
    }

    /// Decodes the single frame at `src[offset..]`, appending its content to
    /// `out`.  Returns the number of input bytes the frame occupied.
    pub fn decode_frame(
        &self,
        src: &[u8],
        offset: usize,
        out: &mut Vec<u8>,
    ) -> Result<usize, FrameError> {
        let (info, header_len) = parse_header(src, offset)?;
        let mut pos = offset + header_len;

        if info.frame_type == FrameType::Skippable {
            let size = info.content_size.unwrap_or(0) as usize;
            require(src, pos, size)?;
            debug!(offset, size, "skippable frame skipped");
            return Ok(header_len + size);
        }

        let max_block = info.block_size_id.block_size();
        let content_start = out.len();
        let mut content_hash = (self.verify_checksums
            && info.content_checksum == ContentChecksum::Enabled)
            .then(|| C::new(0));

        loop {
            require(src, pos, BH_SIZE)?;
            let word_pos = pos;
            let word = read_le32(src, pos);
            pos += BH_SIZE;
            if word == 0 {
                break;
            }

            let raw = word & LZ4F_BLOCK_UNCOMPRESSED_FLAG != 0;
            let size = (word & !LZ4F_BLOCK_UNCOMPRESSED_FLAG) as usize;
            if size > max_block {
                return Err(FrameError::corrupted(
                    word_pos,
                    CorruptionCause::BlockTooLarge { size, max: max_block },
                ));
            }
            require(src, pos, size)?;
            let block = &src[pos..pos + size];

            if info.block_checksum == BlockChecksum::Enabled {
                require(src, pos + size, BF_SIZE)?;
                let stored = read_le32(src, pos + size);
                if self.verify_checksums {
                    let computed = C::oneshot(block, 0);
                    if stored != computed {
                        return Err(FrameError::corrupted(
                            pos + size,
                            CorruptionCause::BlockChecksum { stored, computed },
                        ));
                    }
                }
            }

            let block_start = out.len();
            if raw {
                out.extend_from_slice(block);
            } else {
                out.resize(block_start + max_block, 0);
                match decompress_into(block, 0, size, out, block_start, max_block) {
                    Ok(produced) => out.truncate(block_start + produced),
                    Err(source) => {
                        out.truncate(block_start);
                        return Err(FrameError::corrupted(
                            pos,
                            CorruptionCause::Block { source },
                        ));
                    }
                }
            }
            trace!(
                offset = word_pos,
                raw,
                stored = size,
                decoded = out.len() - block_start,
                "frame block"
            );
            if let Some(hash) = content_hash.as_mut() {
                hash.update(&out[block_start..]);
            }
            pos += size;
            if info.block_checksum == BlockChecksum::Enabled {
                pos += BF_SIZE;
            }
        }

        if info.content_checksum == ContentChecksum::Enabled {
            require(src, pos, CHECKSUM_SIZE)?;
            let stored = read_le32(src, pos);
            if let Some(hash) = content_hash {
                let computed = hash.digest();
                if stored != computed {
                    return Err(FrameError::corrupted(
                        pos,
                        CorruptionCause::ContentChecksum { stored, computed },
                    ));
                }
            }
            pos += CHECKSUM_SIZE;
        }

        let actual = (out.len() - content_start) as u64;
        if let Some(declared) = info.content_size {
            if declared != actual {
                return Err(FrameError::corrupted(
                    offset,
                    CorruptionCause::ContentSize { declared, actual },
                ));
            }
        }
        debug!(offset, decoded = actual, "frame decoded");
        Ok(pos - offset)
    }
}

/// Parses the header of the first frame in `src`.
pub fn frame_info(src: &[u8]) -> Result<FrameInfo, FrameError> {
    parse_header(src, 0).map(|(info, _)| info)
}

/// Decodes every frame in `src` with checksum verification.
pub fn decompress_frame(src: &[u8]) -> Result<Vec<u8>, FrameError> {
    FrameDecoder::new().decode(src)
}
