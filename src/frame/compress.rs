//! LZ4 frame compression.
//!
//! [`FrameEncoder`] is the incremental form: `begin` writes the header,
//! `update` buffers input and emits every full block, `finish` flushes the
//! last partial block and writes the end mark plus the optional content
//! checksum.  All output is appended to a caller-owned `Vec<u8>`.
//!
//! [`compress_frame`] wraps the three calls for a single buffer and records
//! the content size when the preferences ask for one.

use tracing::{debug, trace};

use super::header::{block_scratch_size, compress_frame_bound, write_header, write_le32};
use super::types::{
    BlockChecksum, ContentChecksum, FrameError, Preferences, LZ4F_BLOCK_UNCOMPRESSED_FLAG,
};
use crate::codec::{BlockCompressor, Encoder};
use crate::xxhash::{StreamingChecksum, XxHash32};

/// Incremental frame writer.
///
/// One encoder can write any number of frames in sequence; `finish` leaves it
/// ready for the next `begin`.
pub struct FrameEncoder<C: StreamingChecksum = XxHash32> {
    prefs: Preferences,
    encoder: Encoder,
    /// Input waiting for a full block.
    pending: Vec<u8>,
    scratch: Vec<u8>,
    content_hash: Option<C>,
    total_in: u64,
    in_frame: bool,
}

impl FrameEncoder<XxHash32> {
    pub fn new(prefs: Preferences) -> Self {
        Self::with_checksum(prefs)
    }
}

impl<C: StreamingChecksum> FrameEncoder<C> {
    /// Encoder using checksum implementation `C`.
    pub fn with_checksum(prefs: Preferences) -> Self {
        let block_size = prefs.frame_info.block_size_id.block_size();
        FrameEncoder {
            encoder: prefs.compressor.encoder(),
            pending: Vec::with_capacity(block_size),
            scratch: vec![0u8; block_scratch_size(prefs.frame_info.block_size_id)],
            content_hash: None,
            total_in: 0,
            in_frame: false,
            prefs,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Writes the frame header.  Returns the number of bytes appended.
    pub fn begin(&mut self, out: &mut Vec<u8>) -> Result<usize, FrameError> {
        if self.in_frame {
            return Err(FrameError::InvalidArgument("frame already started"));
        }
        let info = &self.prefs.frame_info;
        let written = write_header(info, out);
        self.content_hash = match info.content_checksum {
            ContentChecksum::Enabled => Some(C::new(0)),
            ContentChecksum::Disabled => None,
        };
        self.pending.clear();
        self.total_in = 0;
        self.in_frame = true;
        debug!(
            compressor = %self.prefs.compressor,
            block_size = info.block_size_id.block_size(),
            "frame started"
        );
        Ok(written)
    }

    /// Feeds `src` into the frame, appending every completed block to `out`.
    /// Returns the number of bytes appended.
    pub fn update(&mut self, src: &[u8], out: &mut Vec<u8>) -> Result<usize, FrameError> {
        if !self.in_frame {
            return Err(FrameError::InvalidArgument("update called before begin"));
        }
        let start = out.len();
        let block_size = self.prefs.frame_info.block_size_id.block_size();
        if let Some(hash) = self.content_hash.as_mut() {
            hash.update(src);
        }
        self.total_in += src.len() as u64;

        let mut input = src;
        if !self.pending.is_empty() {
            let take = (block_size - self.pending.len()).min(input.len());
            self.pending.extend_from_slice(&input[..take]);
            input = &input[take..];
            if self.pending.len() == block_size {
                let block = std::mem::take(&mut self.pending);
                let result = self.write_block(&block, out);
                self.pending = block;
                self.pending.clear();
                result?;
            }
        }
        while input.len() >= block_size {
            self.write_block(&input[..block_size], out)?;
            input = &input[block_size..];
        }
        self.pending.extend_from_slice(input);
        Ok(out.len() - start)
    }

    /// Flushes buffered input, then writes the end mark and the content
    /// checksum.  Returns the number of bytes appended.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<usize, FrameError> {
        if !self.in_frame {
            return Err(FrameError::InvalidArgument("finish called before begin"));
        }
        self.in_frame = false;
        let start = out.len();
        if !self.pending.is_empty() {
            let block = std::mem::take(&mut self.pending);
            let result = self.write_block(&block, out);
            self.pending = block;
            self.pending.clear();
            result?;
        }
        if let Some(declared) = self.prefs.frame_info.content_size {
            if declared != self.total_in {
                return Err(FrameError::InvalidArgument(
                    "declared content size does not match the input",
                ));
            }
        }

        write_le32(out, 0);
        if let Some(hash) = self.content_hash.take() {
            write_le32(out, hash.digest());
        }
        debug!(input = self.total_in, "frame finished");
        Ok(out.len() - start)
    }

    fn write_block(&mut self, block: &[u8], out: &mut Vec<u8>) -> Result<(), FrameError> {
        let info = &self.prefs.frame_info;
        let written = self.encoder.compress(block, &mut self.scratch)?;
        let (word, stored) = if written < block.len() {
            (written as u32, &self.scratch[..written])
        } else {
            trace!(len = block.len(), "block stored uncompressed");
            (block.len() as u32 | LZ4F_BLOCK_UNCOMPRESSED_FLAG, block)
        };
        write_le32(out, word);
        out.extend_from_slice(stored);
        if info.block_checksum == BlockChecksum::Enabled {
            write_le32(out, C::oneshot(stored, 0));
        }
        Ok(())
    }
}

/// Compresses `src` into one complete frame.
///
/// When `prefs` asks for a content size, the header records `src.len()`
/// whatever value was supplied.
pub fn compress_frame(src: &[u8], prefs: &Preferences) -> Result<Vec<u8>, FrameError> {
    let mut prefs = *prefs;
    if prefs.frame_info.content_size.is_some() {
        prefs.frame_info.content_size = Some(src.len() as u64);
    }
    let mut out = Vec::with_capacity(compress_frame_bound(src.len(), &prefs));
    let mut encoder = FrameEncoder::new(prefs);
    encoder.begin(&mut out)?;
    encoder.update(src, &mut out)?;
    encoder.finish(&mut out)?;
    Ok(out)
}

