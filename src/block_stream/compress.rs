//! Block-stream writer.

use tracing::{debug, trace};

use super::types::{
    compression_level, level_for, BlockHeader, BlockStreamError, CHECKSUM_MASK, CHECKSUM_SEED,
    METHOD_LZ4, METHOD_RAW,
};
use crate::codec::{BlockCompressor, Compressor, Encoder};
use crate::config::BLOCK_STREAM_SIZE_DEFAULT;
use crate::xxhash::{StreamingChecksum, XxHash32};

/// Buffers input into fixed-size blocks and writes each as one
/// "LZ4Block" record.
pub struct BlockStreamEncoder<C: StreamingChecksum = XxHash32> {
    block_size: usize,
    level: u8,
    encoder: Encoder,
    pending: Vec<u8>,
    scratch: Vec<u8>,
    finished: bool,
    _checksum: std::marker::PhantomData<C>,
}

impl BlockStreamEncoder<XxHash32> {
    /// Fast compressor, 64 KB blocks.
    pub fn new() -> Self {
        let level = level_for(BLOCK_STREAM_SIZE_DEFAULT);
        Self::build(BLOCK_STREAM_SIZE_DEFAULT, level, Compressor::fast())
    }

    /// `block_size` must lie in `64..=32 MiB`.
    pub fn with_block_size(
        block_size: usize,
        compressor: Compressor,
    ) -> Result<Self, BlockStreamError> {
        Self::with_checksum(block_size, compressor)
    }
}

impl Default for BlockStreamEncoder<XxHash32> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamingChecksum> BlockStreamEncoder<C> {
    pub fn with_checksum(
        block_size: usize,
        compressor: Compressor,
    ) -> Result<Self, BlockStreamError> {
        let level = compression_level(block_size)?;
        Ok(Self::build(block_size, level, compressor))
    }

    fn build(block_size: usize, level: u8, compressor: Compressor) -> Self {
        let encoder = compressor.encoder();
        let scratch = vec![0u8; encoder.max_compressed_length(block_size)];
        BlockStreamEncoder {
            block_size,
            level,
            encoder,
            pending: Vec::with_capacity(block_size),
            scratch,
            finished: false,
            _checksum: std::marker::PhantomData,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Appends `src` to the stream, writing every completed block to `out`.
    pub fn write(&mut self, src: &[u8], out: &mut Vec<u8>) -> Result<usize, BlockStreamError> {
        self.ensure_not_finished()?;
        let start = out.len();
        let mut input = src;
        while self.pending.len() + input.len() > self.block_size {
            let take = self.block_size - self.pending.len();
            self.pending.extend_from_slice(&input[..take]);
            input = &input[take..];
            self.flush_pending(out)?;
        }
        self.pending.extend_from_slice(input);
        Ok(out.len() - start)
    }

    /// Writes buffered input as a (possibly short) block.
    pub fn flush(&mut self, out: &mut Vec<u8>) -> Result<usize, BlockStreamError> {
        self.ensure_not_finished()?;
        let start = out.len();
        self.flush_pending(out)?;
        Ok(out.len() - start)
    }

    /// Flushes buffered input and writes the end mark.  Further writes fail.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<usize, BlockStreamError> {
        self.ensure_not_finished()?;
        let start = out.len();
        self.flush_pending(out)?;
        BlockHeader::end_mark(self.level).write(out);
        self.finished = true;
        debug!(block_size = self.block_size, "block stream finished");
        Ok(out.len() - start)
    }

    fn ensure_not_finished(&self) -> Result<(), BlockStreamError> {
        if self.finished {
            return Err(BlockStreamError::InvalidArgument("stream already finished"));
        }
        Ok(())
    }

    fn flush_pending(&mut self, out: &mut Vec<u8>) -> Result<(), BlockStreamError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let block = &self.pending;
        let checksum = C::oneshot(block, CHECKSUM_SEED) & CHECKSUM_MASK;
        let written = self.encoder.compress(block, &mut self.scratch)?;
        let (method, stored) = if written < block.len() {
            (METHOD_LZ4, &self.scratch[..written])
        } else {
            trace!(len = block.len(), "block stored raw");
            (METHOD_RAW, block.as_slice())
        };
        BlockHeader {
            method,
            level: self.level,
            compressed_len: stored.len() as i32,
            original_len: block.len() as i32,
            checksum,
        }
        .write(out);
        out.extend_from_slice(stored);
        self.pending.clear();
        Ok(())
    }
}

/// Compresses `src` into a complete stream with the fast compressor.
pub fn compress_block_stream(src: &[u8], block_size: usize) -> Result<Vec<u8>, BlockStreamError> {
    compress_block_stream_with(src, block_size, Compressor::fast())
}

/// Compresses `src` into a complete stream with `compressor`.
pub fn compress_block_stream_with(
    src: &[u8],
    block_size: usize,
    compressor: Compressor,
) -> Result<Vec<u8>, BlockStreamError> {
    let mut encoder = BlockStreamEncoder::with_block_size(block_size, compressor)?;
    let mut out = Vec::with_capacity(src.len() / 2 + 64);
    encoder.write(src, &mut out)?;
    encoder.finish(&mut out)?;
    Ok(out)
}
