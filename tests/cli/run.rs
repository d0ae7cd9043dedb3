// Integration tests for src/cli/mod.rs: option building and the end-to-end
// dispatch to the file front end.

use std::fs;

use clap::Parser;
use lz4::cli::args::Args;
use lz4::cli::{compress_options, run};
use lz4::codec::Compressor;
use lz4::config::{Settings, BLOCK_STREAM_SIZE_DEFAULT};
use lz4::frame::{BlockChecksum, BlockSizeId, ContentChecksum};
use lz4::io::Format;
use tempfile::TempDir;

fn settings(clevel: i32) -> Settings {
    Settings { clevel }
}

#[test]
fn default_options() {
    let args = Args::parse_from(["lz4", "x"]);
    let opts = compress_options(&args, &Settings::default(), "x");
    assert_eq!(opts.format, Format::Frame);
    assert_eq!(opts.compressor(), Compressor::fast());
    assert_eq!(opts.prefs.frame_info.block_size_id, BlockSizeId::Max64Kb);
    assert_eq!(opts.prefs.frame_info.block_checksum, BlockChecksum::Disabled);
    assert_eq!(opts.prefs.frame_info.content_checksum, ContentChecksum::Enabled);
    assert_eq!(opts.prefs.frame_info.content_size, None);
    assert_eq!(opts.block_stream_size, BLOCK_STREAM_SIZE_DEFAULT);
    assert!(!opts.overwrite);
}

#[test]
fn hc_level_sources() {
    let args = Args::parse_from(["lz4", "--hc", "x"]);
    assert_eq!(compress_options(&args, &settings(12), "x").compressor(), Compressor::hc(12));

    let args = Args::parse_from(["lz4", "--hc=3", "x"]);
    assert_eq!(compress_options(&args, &settings(12), "x").compressor(), Compressor::hc(3));

    let args = Args::parse_from(["lz4", "--hc=99", "x"]);
    assert_eq!(
        compress_options(&args, &settings(12), "x").compressor(),
        Compressor::Hc { level: 17 }
    );
}

#[test]
fn fast_acceleration() {
    let args = Args::parse_from(["lz4", "--fast=8", "x"]);
    assert_eq!(
        compress_options(&args, &Settings::default(), "x").compressor(),
        Compressor::Fast { acceleration: 8 }
    );
    let args = Args::parse_from(["lz4", "--fast=0", "x"]);
    assert_eq!(
        compress_options(&args, &Settings::default(), "x").compressor(),
        Compressor::fast()
    );
}

#[test]
fn frame_flags() {
    let args = Args::parse_from([
        "lz4",
        "-B",
        "6",
        "--block-checksum",
        "--no-content-checksum",
        "-f",
        "x",
    ]);
    let opts = compress_options(&args, &Settings::default(), "x");
    assert_eq!(opts.prefs.frame_info.block_size_id, BlockSizeId::Max1Mb);
    assert_eq!(opts.prefs.frame_info.block_checksum, BlockChecksum::Enabled);
    assert_eq!(opts.prefs.frame_info.content_checksum, ContentChecksum::Disabled);
    assert!(opts.overwrite);
}

#[test]
fn content_size_from_file_metadata() {
    let dir = TempDir::new().expect("TempDir::new");
    let path = dir.path().join("sized.bin");
    fs::write(&path, vec![7u8; 1234]).expect("write");
    let path = path.to_str().expect("utf-8");

    let args = Args::parse_from(["lz4", "--content-size", path]);
    let opts = compress_options(&args, &Settings::default(), path);
    assert_eq!(opts.prefs.frame_info.content_size, Some(1234));

    let opts = compress_options(&args, &Settings::default(), "stdin");
    assert_eq!(opts.prefs.frame_info.content_size, None);
}

#[test]
fn block_stream_options() {
    let args = Args::parse_from(["lz4", "-l", "--block-stream-size", "2048", "x"]);
    let opts = compress_options(&args, &Settings::default(), "x");
    assert_eq!(opts.format, Format::BlockStream);
    assert_eq!(opts.block_stream_size, 2048);
}

#[test]
fn compress_then_decompress_by_extension() {
    let dir = TempDir::new().expect("TempDir::new");
    let input = dir.path().join("notes.txt");
    let content = b"line of notes\n".repeat(2000);
    fs::write(&input, &content).expect("write");
    let input = input.to_str().expect("utf-8").to_owned();
    let packed = format!("{input}.lz4");
    let restored = dir.path().join("restored.txt");

    let summary = run(&Args::parse_from(["lz4", input.as_str()]), &Settings::default())
        .expect("compress");
    assert_eq!(summary.bytes_in, content.len() as u64);
    assert!(fs::metadata(&packed).expect("packed file").len() < content.len() as u64);

    let args = Args::parse_from(["lz4", packed.as_str(), restored.to_str().expect("utf-8")]);
    run(&args, &Settings::default()).expect("decompress");
    assert_eq!(fs::read(&restored).expect("read"), content);
}

#[test]
fn block_stream_round_trip_through_run() {
    let dir = TempDir::new().expect("TempDir::new");
    let input = dir.path().join("data.bin");
    let content: Vec<u8> = (0..50_000u32).map(|i| (i % 97) as u8).collect();
    fs::write(&input, &content).expect("write");
    let input = input.to_str().expect("utf-8").to_owned();
    let packed = format!("{input}.lz4");
    let restored = dir.path().join("out.bin");

    let args = Args::parse_from(["lz4", "-l", "--hc=5", input.as_str()]);
    run(&args, &Settings::default()).expect("compress");
    assert!(fs::read(&packed).expect("packed").starts_with(b"LZ4Block"));

    let args = Args::parse_from(["lz4", "-d", packed.as_str(), restored.to_str().expect("utf-8")]);
    run(&args, &Settings::default()).expect("decompress");
    assert_eq!(fs::read(&restored).expect("read"), content);
}

#[test]
fn compression_flags_rejected_when_decompressing() {
    let dir = TempDir::new().expect("TempDir::new");
    let packed = dir.path().join("x.lz4");
    fs::write(&packed, b"irrelevant").expect("write");
    let args = Args::parse_from(["lz4", "-d", "-l", packed.to_str().expect("utf-8")]);
    let err = run(&args, &Settings::default()).expect_err("flags conflict");
    assert!(err.to_string().contains("compression flags"));
}

#[test]
fn existing_output_without_force_fails() {
    let dir = TempDir::new().expect("TempDir::new");
    let input = dir.path().join("a.txt");
    fs::write(&input, b"abc").expect("write");
    let output = dir.path().join("a.txt.lz4");
    fs::write(&output, b"occupied").expect("write");

    let input = input.to_str().expect("utf-8");
    assert!(run(&Args::parse_from(["lz4", input]), &Settings::default()).is_err());
    assert_eq!(fs::read(&output).expect("read"), b"occupied");
    run(&Args::parse_from(["lz4", "-f", input]), &Settings::default()).expect("forced");
}
