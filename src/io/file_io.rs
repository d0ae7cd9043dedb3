//! File I/O primitives for the file front end.
//!
//! - [`open_src`] resolves a path to a `Box<dyn Read>`, handling the
//!   `"stdin"` sentinel and rejecting directories.
//! - [`open_dst`] resolves a path to a `Box<dyn Write>`, handling the
//!   `"stdout"` sentinel and the overwrite policy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Extension appended by compression and stripped by decompression.
pub const LZ4_EXTENSION: &str = ".lz4";

/// Opens `path` for reading.
pub fn open_src(path: &str) -> Result<Box<dyn Read>> {
    if path == STDIN_MARK {
        debug!("using stdin for input");
        return Ok(Box::new(io::stdin().lock()));
    }
    if Path::new(path).is_dir() {
        bail!("{path}: is a directory");
    }
    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Opens `path` for writing.  An existing file is replaced only when
/// `overwrite` is set.
pub fn open_dst(path: &str, overwrite: bool) -> Result<Box<dyn Write>> {
    if path == STDOUT_MARK {
        debug!("using stdout for output");
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let file = options.open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::AlreadyExists {
            anyhow::anyhow!("{path} already exists; use --force to overwrite")
        } else {
            anyhow::Error::new(err).context(format!("cannot create {path}"))
        }
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Output name for compressing `input`: `input` plus `.lz4`.
pub fn compressed_name(input: &str) -> String {
    format!("{input}{LZ4_EXTENSION}")
}

/// Output name for decompressing `input`: `input` without its `.lz4`
/// extension, or `None` when it has none.
pub fn decompressed_name(input: &str) -> Option<String> {
    input
        .strip_suffix(LZ4_EXTENSION)
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
}
