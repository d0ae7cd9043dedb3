//! Decompression of whole files and readers.
//!
//! The input is read completely, then walked container by container: the
//! leading bytes of each one select the frame decoder (including skippable
//! frames) or the block-stream decoder, so files made of concatenated
//! containers of either kind decode in one pass.

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use super::file_io::{open_dst, open_src};
use super::{Format, IoSummary};
use crate::block_stream::{self, BlockStreamDecoder};
use crate::frame::header::{is_skippable_magic, read_le32};
use crate::frame::types::LZ4F_MAGIC;
use crate::frame::FrameDecoder;

/// Identifies the container starting at `src[0]`.
pub fn detect_format(src: &[u8]) -> Option<Format> {
    if src.starts_with(block_stream::MAGIC) {
        return Some(Format::BlockStream);
    }
    if src.len() >= 4 {
        let magic = read_le32(src, 0);
        if magic == LZ4F_MAGIC || is_skippable_magic(magic) {
            return Some(Format::Frame);
        }
    }
    None
}

/// Decodes every container in `src`, appending the content to `out`.
pub fn decompress_buffer(src: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let frames = FrameDecoder::new();
    let streams = BlockStreamDecoder::new();
    let mut pos = 0;
    let mut containers = 0usize;
    while pos < src.len() {
        let rest = &src[pos..];
        let consumed = match detect_format(rest) {
            Some(Format::Frame) => frames
                .decode_frame(src, pos, out)
                .with_context(|| format!("frame #{containers} at offset {pos}"))?,
            Some(Format::BlockStream) => streams
                .decode_into(rest, out)
                .with_context(|| format!("block stream #{containers} at offset {pos}"))?,
            None if containers == 0 => bail!("unrecognized header: not an LZ4 file"),
            None => bail!("unrecognized data after container #{containers} at offset {pos}"),
        };
        debug!(offset = pos, consumed, "container decoded");
        pos += consumed;
        containers += 1;
    }
    if containers == 0 {
        bail!("empty input: not an LZ4 file");
    }
    Ok(())
}

/// Decompresses everything `reader` yields into `writer`.
pub fn decompress_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<IoSummary> {
    let mut src = Vec::new();
    reader.read_to_end(&mut src).context("cannot read input")?;
    let mut out = Vec::new();
    decompress_buffer(&src, &mut out)?;
    writer.write_all(&out).context("cannot write output")?;
    writer.flush().context("cannot flush output")?;
    Ok(IoSummary {
        bytes_in: src.len() as u64,
        bytes_out: out.len() as u64,
    })
}

/// Decompresses `src` (a path or `"stdin"`) into `dst` (a path or `"stdout"`).
pub fn decompress_file(src: &str, dst: &str, overwrite: bool) -> Result<IoSummary> {
    let mut reader = open_src(src)?;
    // Decode before creating the output so a corrupt input leaves no file.
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .with_context(|| format!("cannot read {src}"))?;
    let mut out = Vec::new();
    decompress_buffer(&input, &mut out).with_context(|| format!("decompressing {src}"))?;

    let mut writer = open_dst(dst, overwrite)?;
    writer.write_all(&out).with_context(|| format!("cannot write {dst}"))?;
    writer.flush().with_context(|| format!("cannot flush {dst}"))?;
    info!("{src}: decoded {} bytes", out.len());
    Ok(IoSummary {
        bytes_in: input.len() as u64,
        bytes_out: out.len() as u64,
    })
}
