//! Compression of whole files and readers.
//!
//! Input is read in block-sized chunks and fed to the incremental container
//! encoders, so memory use is bounded by one block plus its encoding.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use tracing::info;

use super::file_io::{open_dst, open_src};
use super::{Format, IoSummary};
use crate::block_stream::BlockStreamEncoder;
use crate::codec::Compressor;
use crate::config::BLOCK_STREAM_SIZE_DEFAULT;
use crate::frame::{FrameEncoder, Preferences};

/// How to compress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    pub format: Format,
    /// Frame settings; the compressor is also used by the block-stream format.
    pub prefs: Preferences,
    /// Block size of the block-stream format.
    pub block_stream_size: usize,
    pub overwrite: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        CompressOptions {
            format: Format::Frame,
            prefs: Preferences::default(),
            block_stream_size: BLOCK_STREAM_SIZE_DEFAULT,
            overwrite: false,
        }
    }
}

impl CompressOptions {
    pub fn compressor(&self) -> Compressor {
        self.prefs.compressor
    }
}

/// Compresses everything `reader` yields into `writer`.
pub fn compress_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    opts: &CompressOptions,
) -> Result<IoSummary> {
    let mut summary = IoSummary::default();
    let mut out = Vec::new();
    match opts.format {
        Format::Frame => {
            let chunk = opts.prefs.frame_info.block_size_id.block_size();
            let mut encoder = FrameEncoder::new(opts.prefs);
            encoder.begin(&mut out)?;
            let mut buf = vec![0u8; chunk];
            loop {
                let n = read_chunk(reader, &mut buf)?;
                if n == 0 {
                    break;
                }
                summary.bytes_in += n as u64;
                encoder.update(&buf[..n], &mut out)?;
                summary.bytes_out += drain(&mut out, writer)?;
            }
            encoder.finish(&mut out)?;
        }
        Format::BlockStream => {
            let mut encoder =
                BlockStreamEncoder::with_block_size(opts.block_stream_size, opts.compressor())?;
            let mut buf = vec![0u8; opts.block_stream_size];
            loop {
                let n = read_chunk(reader, &mut buf)?;
                if n == 0 {
                    break;
                }
                summary.bytes_in += n as u64;
                encoder.write(&buf[..n], &mut out)?;
                summary.bytes_out += drain(&mut out, writer)?;
            }
            encoder.finish(&mut out)?;
        }
    }
    summary.bytes_out += drain(&mut out, writer)?;
    writer.flush().context("cannot flush output")?;
    Ok(summary)
}

/// Compresses `src` (a path or `"stdin"`) into `dst` (a path or `"stdout"`).
pub fn compress_file(src: &str, dst: &str, opts: &CompressOptions) -> Result<IoSummary> {
    let mut reader = open_src(src)?;
    let mut writer = open_dst(dst, opts.overwrite)?;
    let summary = compress_stream(&mut reader, &mut writer, opts)
        .with_context(|| format!("compressing {src}"))?;
    info!(
        "compressed {} bytes into {} bytes ==> {:.2}%",
        summary.bytes_in,
        summary.bytes_out,
        summary.ratio_percent()
    );
    Ok(summary)
}

/// Fills `buf` unless the input ends first; returns the bytes read.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("cannot read input"),
        }
    }
    Ok(filled)
}

fn drain<W: Write>(out: &mut Vec<u8>, writer: &mut W) -> Result<u64> {
    writer.write_all(out).context("cannot write output")?;
    let n = out.len() as u64;
    out.clear();
    Ok(n)
}
