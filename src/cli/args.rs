//! Command-line arguments of the `lz4` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::frame::BlockSizeId;

#[derive(Debug, Parser)]
#[command(name = "lz4", version, about = "Compress or decompress files with LZ4")]
pub struct Args {
    /// Force compression.
    #[arg(short = 'z', long, conflicts_with = "decompress")]
    pub compress: bool,

    /// Force decompression.
    #[arg(short = 'd', long, visible_alias = "uncompress")]
    pub decompress: bool,

    /// Use the high-compression encoder at this level (1..=17).
    /// Without a value, LZ4_CLEVEL or 9 is used.
    #[arg(long = "hc", value_name = "LEVEL", num_args = 0..=1, require_equals = true)]
    pub hc: Option<Option<i32>>,

    /// Acceleration of the fast encoder; higher is faster and compresses less.
    #[arg(long = "fast", value_name = "N", default_value_t = 1, conflicts_with = "hc")]
    pub acceleration: u32,

    /// Frame block size.
    #[arg(short = 'B', long = "block-size", value_enum, default_value_t = BlockSizeArg::Max64Kb)]
    pub block_size: BlockSizeArg,

    /// Add a checksum after each frame block.
    #[arg(long)]
    pub block_checksum: bool,

    /// Omit the content checksum at the end of the frame.
    #[arg(long)]
    pub no_content_checksum: bool,

    /// Record the input size in the frame header (regular files only).
    #[arg(long)]
    pub content_size: bool,

    /// Write the "LZ4Block" stream format instead of the frame format.
    #[arg(short = 'l', long = "block-stream")]
    pub block_stream: bool,

    /// Block size of the "LZ4Block" stream format, in bytes.
    #[arg(long, value_name = "BYTES", requires = "block_stream")]
    pub block_stream_size: Option<usize>,

    /// Overwrite the output file.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Write to standard output.
    #[arg(short = 'c', long)]
    pub stdout: bool,

    /// More log output; repeat for more.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output; repeat for less.
    #[arg(short = 'q', long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Input file, or "stdin".  Standard input when omitted.
    pub input: Option<PathBuf>,

    /// Output file, or "stdout".  Derived from the input name when omitted.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlockSizeArg {
    #[value(name = "4", alias = "64KB")]
    Max64Kb,
    #[value(name = "5", alias = "256KB")]
    Max256Kb,
    #[value(name = "6", alias = "1MB")]
    Max1Mb,
    #[value(name = "7", alias = "4MB")]
    Max4Mb,
}

impl From<BlockSizeArg> for BlockSizeId {
    fn from(arg: BlockSizeArg) -> Self {
        match arg {
            BlockSizeArg::Max64Kb => BlockSizeId::Max64Kb,
            BlockSizeArg::Max256Kb => BlockSizeId::Max256Kb,
            BlockSizeArg::Max1Mb => BlockSizeId::Max1Mb,
            BlockSizeArg::Max4Mb => BlockSizeId::Max4Mb,
        }
    }
}

impl Args {
    /// Log filter level implied by `-v`/`-q`: 0 is errors only, 2 the
    /// default, 4 and above everything.
    pub fn verbosity(&self) -> i32 {
        2 + i32::from(self.verbose) - i32::from(self.quiet)
    }
}
