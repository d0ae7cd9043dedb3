// Integration tests for src/cli/op_mode.rs: mode inference and path
// resolution.

use std::path::Path;

use clap::Parser;
use lz4::cli::args::Args;
use lz4::cli::op_mode::{determine_op_mode, resolve_paths, OpMode};
use lz4::io::{STDIN_MARK, STDOUT_MARK};

fn paths(argv: &[&str], mode: OpMode) -> (String, String) {
    resolve_paths(&Args::parse_from(argv), mode).expect("paths")
}

#[test]
fn mode_from_extension() {
    assert_eq!(determine_op_mode(Some(Path::new("a/b/c.lz4"))), OpMode::Decompress);
    assert_eq!(determine_op_mode(Some(Path::new("c.lz4.txt"))), OpMode::Compress);
    assert_eq!(determine_op_mode(Some(Path::new("c.LZ4"))), OpMode::Compress);
    assert_eq!(determine_op_mode(None), OpMode::Compress);
}

#[test]
fn explicit_output_is_kept() {
    assert_eq!(
        paths(&["lz4", "in.txt", "custom.bin"], OpMode::Compress),
        ("in.txt".to_owned(), "custom.bin".to_owned())
    );
    assert_eq!(
        paths(&["lz4", "-d", "in.bin", "out.txt"], OpMode::Decompress),
        ("in.bin".to_owned(), "out.txt".to_owned())
    );
}

#[test]
fn derived_output_names() {
    assert_eq!(paths(&["lz4", "dir/x.tar"], OpMode::Compress).1, "dir/x.tar.lz4");
    assert_eq!(paths(&["lz4", "dir/x.tar.lz4"], OpMode::Decompress).1, "dir/x.tar");
}

#[test]
fn stdin_sentinel_and_stdout_flag() {
    assert_eq!(
        paths(&["lz4", "-d", "-c"], OpMode::Decompress),
        (STDIN_MARK.to_owned(), STDOUT_MARK.to_owned())
    );
    assert_eq!(
        paths(&["lz4", "-c", "stdin"], OpMode::Compress),
        (STDIN_MARK.to_owned(), STDOUT_MARK.to_owned())
    );
}

#[test]
fn decompressing_stdin_goes_to_stdout() {
    assert_eq!(paths(&["lz4", "-d"], OpMode::Decompress).1, STDOUT_MARK);
}

#[test]
fn missing_extension_is_an_error() {
    let args = Args::parse_from(["lz4", "-d", "archive.zip"]);
    let err = resolve_paths(&args, OpMode::Decompress).expect_err("no extension");
    assert!(err.to_string().contains("archive.zip"));
}
