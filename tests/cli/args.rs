// Integration tests for src/cli/args.rs: flag parsing and conflicts.

use clap::Parser;
use lz4::cli::args::{Args, BlockSizeArg};
use lz4::frame::BlockSizeId;

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(argv).expect("parse should succeed")
}

fn parse_err(argv: &[&str]) -> clap::error::ErrorKind {
    Args::try_parse_from(argv)
        .expect_err("expected parse error")
        .kind()
}

#[test]
fn defaults() {
    let args = parse(&["lz4"]);
    assert!(!args.compress && !args.decompress);
    assert_eq!(args.hc, None);
    assert_eq!(args.acceleration, 1);
    assert_eq!(args.block_size, BlockSizeArg::Max64Kb);
    assert!(!args.block_checksum);
    assert!(!args.no_content_checksum);
    assert!(!args.content_size);
    assert!(!args.block_stream);
    assert_eq!(args.block_stream_size, None);
    assert!(!args.force && !args.stdout);
    assert_eq!(args.input, None);
    assert_eq!(args.output, None);
    assert_eq!(args.verbosity(), 2);
}

#[test]
fn positional_paths() {
    let args = parse(&["lz4", "in.txt", "out.lz4"]);
    assert_eq!(args.input.as_deref().and_then(|p| p.to_str()), Some("in.txt"));
    assert_eq!(args.output.as_deref().and_then(|p| p.to_str()), Some("out.lz4"));
}

#[test]
fn aggregated_short_flags() {
    let args = parse(&["lz4", "-dfc", "in.lz4"]);
    assert!(args.decompress && args.force && args.stdout);
}

#[test]
fn uncompress_alias() {
    assert!(parse(&["lz4", "--uncompress", "x.lz4"]).decompress);
}

#[test]
fn compress_and_decompress_conflict() {
    assert_eq!(
        parse_err(&["lz4", "-z", "-d", "x"]),
        clap::error::ErrorKind::ArgumentConflict
    );
}

#[test]
fn hc_and_fast_conflict() {
    assert_eq!(
        parse_err(&["lz4", "--hc=4", "--fast=3", "x"]),
        clap::error::ErrorKind::ArgumentConflict
    );
}

#[test]
fn hc_level_must_be_numeric() {
    assert_eq!(
        parse_err(&["lz4", "--hc=max", "x"]),
        clap::error::ErrorKind::ValueValidation
    );
}

#[test]
fn block_size_names_and_aliases() {
    for (value, id) in [
        ("4", BlockSizeId::Max64Kb),
        ("5", BlockSizeId::Max256Kb),
        ("1MB", BlockSizeId::Max1Mb),
        ("4MB", BlockSizeId::Max4Mb),
    ] {
        let args = parse(&["lz4", "-B", value, "x"]);
        assert_eq!(BlockSizeId::from(args.block_size), id, "-B {value}");
    }
    assert_eq!(
        parse_err(&["lz4", "-B", "3", "x"]),
        clap::error::ErrorKind::InvalidValue
    );
}

#[test]
fn block_stream_size_requires_block_stream() {
    assert_eq!(
        parse_err(&["lz4", "--block-stream-size", "4096", "x"]),
        clap::error::ErrorKind::MissingRequiredArgument
    );
    let args = parse(&["lz4", "-l", "--block-stream-size", "4096", "x"]);
    assert!(args.block_stream);
    assert_eq!(args.block_stream_size, Some(4096));
}

#[test]
fn verbose_and_quiet() {
    assert_eq!(parse(&["lz4", "-v"]).verbosity(), 3);
    assert_eq!(parse(&["lz4", "-qq"]).verbosity(), 0);
    assert_eq!(parse(&["lz4", "-qqq"]).verbosity(), -1);
    assert_eq!(
        parse_err(&["lz4", "-v", "-q"]),
        clap::error::ErrorKind::ArgumentConflict
    );
}
