//! Operation mode selection and input/output name resolution.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{bail, Result};

use super::args::Args;
use crate::io::{compressed_name, decompressed_name, LZ4_EXTENSION, STDIN_MARK, STDOUT_MARK};

/// What the CLI should do with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
}

/// Infers the mode from the input name: `.lz4` files are decompressed,
/// everything else (including standard input) is compressed.
pub fn determine_op_mode(input: Option<&Path>) -> OpMode {
    match input.and_then(Path::to_str) {
        Some(name) if name.ends_with(LZ4_EXTENSION) => OpMode::Decompress,
        _ => OpMode::Compress,
    }
}

/// Resolves the input and output names, applying the stdin/stdout sentinels
/// and deriving the output name from the input when none is given.
pub fn resolve_paths(args: &Args, mode: OpMode) -> Result<(String, String)> {
    let input = match args.input.as_deref() {
        Some(path) => path_str(path)?,
        None => STDIN_MARK.to_owned(),
    };
    if args.stdout {
        return Ok((input, STDOUT_MARK.to_owned()));
    }
    if let Some(path) = args.output.as_deref() {
        return Ok((input, path_str(path)?));
    }
    if input == STDIN_MARK {
        if mode == OpMode::Compress && std::io::stdout().is_terminal() {
            bail!("refusing to write compressed data to a terminal; use -c or name an output");
        }
        return Ok((input, STDOUT_MARK.to_owned()));
    }
    let output = match mode {
        OpMode::Compress => compressed_name(&input),
        OpMode::Decompress => match decompressed_name(&input) {
            Some(name) => name,
            None => bail!(
                "cannot determine an output name for {input}: no {LZ4_EXTENSION} extension"
            ),
        },
    };
    Ok((input, output))
}

fn path_str(path: &Path) -> Result<String> {
    match path.to_str() {
        Some(s) => Ok(s.to_owned()),
        None => bail!("path is not valid UTF-8: {}", path.display()),
    }
}
