//! Command-line interface for the `lz4` binary.
//!
//! | Submodule   | Responsibility |
//! |-------------|----------------|
//! | [`args`]    | `clap` definition of the flags and positional paths. |
//! | [`op_mode`] | Chooses compress or decompress and resolves file names. |
//!
//! [`run`] turns parsed [`args::Args`] into one `io` call.

pub mod args;
pub mod op_mode;

use anyhow::{bail, Result};
use tracing::debug;

use crate::codec::Compressor;
use crate::config::{Settings, BLOCK_STREAM_SIZE_DEFAULT};
use crate::frame::Preferences;
use crate::io::{compress_file, decompress_file, CompressOptions, Format, IoSummary};
use args::Args;
use op_mode::{determine_op_mode, resolve_paths, OpMode};

/// Builds the compression options selected by `args`.
pub fn compress_options(args: &Args, settings: &Settings, input: &str) -> CompressOptions {
    let compressor = match args.hc {
        Some(level) => Compressor::hc(level.unwrap_or(settings.clevel)),
        None => Compressor::Fast {
            acceleration: args.acceleration.max(1),
        },
    };
    let mut prefs = Preferences::default()
        .with_block_size(args.block_size.into())
        .with_block_checksum(args.block_checksum)
        .with_content_checksum(!args.no_content_checksum)
        .with_compressor(compressor);
    if args.content_size {
        match std::fs::metadata(input) {
            Ok(meta) if meta.is_file() => prefs = prefs.with_content_size(Some(meta.len())),
            _ => debug!("content size unavailable for {input}"),
        }
    }
    CompressOptions {
        format: if args.block_stream {
            Format::BlockStream
        } else {
            Format::Frame
        },
        prefs,
        block_stream_size: args.block_stream_size.unwrap_or(BLOCK_STREAM_SIZE_DEFAULT),
        overwrite: args.force,
    }
}

/// Runs the operation selected by `args`.
pub fn run(args: &Args, settings: &Settings) -> Result<IoSummary> {
    let mode = if args.decompress {
        OpMode::Decompress
    } else if args.compress {
        OpMode::Compress
    } else {
        determine_op_mode(args.input.as_deref())
    };
    let (input, output) = resolve_paths(args, mode)?;
    debug!(?mode, %input, %output, "dispatching");

    match mode {
        OpMode::Compress => {
            let opts = compress_options(args, settings, &input);
            compress_file(&input, &output, &opts)
        }
        OpMode::Decompress => {
            if args.block_stream || args.hc.is_some() {
                bail!("compression flags given while decompressing");
            }
            decompress_file(&input, &output, args.force)
        }
    }
}
