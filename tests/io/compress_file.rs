// Integration tests for src/io/compress_file.rs: stream and file compression
// into both containers.

use std::fs;
use std::io::Cursor;

use lz4::block_stream::{decompress_block_stream, MAGIC};
use lz4::codec::Compressor;
use lz4::frame::{decompress_frame, frame_info, BlockSizeId, ContentChecksum, Preferences};
use lz4::io::{compress_file, compress_stream, CompressOptions, Format, IoSummary};
use tempfile::TempDir;

fn sample(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| b"lorem ipsum dolor sit amet, "[i % 28] ^ ((i / 4096) as u8 & 3))
        .collect()
}

fn compress_bytes(input: &[u8], opts: &CompressOptions) -> (Vec<u8>, IoSummary) {
    let mut out = Vec::new();
    let summary = compress_stream(&mut Cursor::new(input), &mut out, opts).expect("compress");
    (out, summary)
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn default_options_write_a_frame() {
    let opts = CompressOptions::default();
    assert_eq!(opts.format, Format::Frame);
    assert!(!opts.overwrite);
    assert_eq!(opts.compressor(), Compressor::fast());

    let input = sample(200_000);
    let (out, summary) = compress_bytes(&input, &opts);
    assert_eq!(&out[..4], &[0x04, 0x22, 0x4D, 0x18]);
    assert_eq!(summary.bytes_in, input.len() as u64);
    assert_eq!(summary.bytes_out, out.len() as u64);
    assert_eq!(decompress_frame(&out).expect("decode"), input);
}

#[test]
fn empty_input_writes_an_empty_frame() {
    let (out, summary) = compress_bytes(&[], &CompressOptions::default());
    assert_eq!(
        out,
        [0x04, 0x22, 0x4D, 0x18, 0x64, 0x40, 0xA7, 0, 0, 0, 0, 0x05, 0x5D, 0xCC, 0x02]
    );
    assert_eq!(summary.bytes_in, 0);
    assert_eq!(summary.bytes_out, 15);
}

#[test]
fn frame_preferences_are_honoured() {
    let opts = CompressOptions {
        prefs: Preferences::default()
            .with_block_size(BlockSizeId::Max256Kb)
            .with_block_checksum(true)
            .with_content_checksum(false)
            .with_compressor(Compressor::hc(4)),
        ..CompressOptions::default()
    };
    let input = sample(600_000);
    let (out, _) = compress_bytes(&input, &opts);
    let info = frame_info(&out).expect("header");
    assert_eq!(info.block_size_id, BlockSizeId::Max256Kb);
    assert_eq!(info.content_checksum, ContentChecksum::Disabled);
    assert_eq!(decompress_frame(&out).expect("decode"), input);
}

#[test]
fn declared_content_size_must_match() {
    let opts = CompressOptions {
        prefs: Preferences::default().with_content_size(Some(10)),
        ..CompressOptions::default()
    };
    let mut out = Vec::new();
    assert!(compress_stream(&mut Cursor::new(&b"eleven byte"[..]), &mut out, &opts).is_err());

    let (out, _) = compress_bytes(b"ten bytes!", &opts);
    assert_eq!(frame_info(&out).expect("header").content_size, Some(10));
}

#[test]
fn block_stream_format() {
    let opts = CompressOptions {
        format: Format::BlockStream,
        block_stream_size: 4096,
        ..CompressOptions::default()
    };
    let input = sample(50_000);
    let (out, summary) = compress_bytes(&input, &opts);
    assert!(out.starts_with(MAGIC));
    assert_eq!(summary.bytes_out, out.len() as u64);
    assert_eq!(decompress_block_stream(&out).expect("decode"), input);
}

#[test]
fn block_stream_size_is_validated() {
    let opts = CompressOptions {
        format: Format::BlockStream,
        block_stream_size: 10,
        ..CompressOptions::default()
    };
    let mut out = Vec::new();
    assert!(compress_stream(&mut Cursor::new(&b"data"[..]), &mut out, &opts).is_err());
}

#[test]
fn ratio_percent() {
    let summary = IoSummary {
        bytes_in: 200,
        bytes_out: 50,
    };
    assert!((summary.ratio_percent() - 25.0).abs() < 1e-9);
    assert_eq!(IoSummary::default().ratio_percent(), 100.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compress_file_writes_output() {
    let dir = TempDir::new().expect("TempDir::new");
    let src = dir.path().join("in.txt");
    let dst = dir.path().join("in.txt.lz4");
    let input = sample(100_000);
    fs::write(&src, &input).expect("write");

    let summary = compress_file(
        src.to_str().expect("utf-8"),
        dst.to_str().expect("utf-8"),
        &CompressOptions::default(),
    )
    .expect("compress");
    let written = fs::read(&dst).expect("read output");
    assert_eq!(summary.bytes_in, input.len() as u64);
    assert_eq!(summary.bytes_out, written.len() as u64);
    assert_eq!(decompress_frame(&written).expect("decode"), input);
}

#[test]
fn compress_file_respects_overwrite() {
    let dir = TempDir::new().expect("TempDir::new");
    let src = dir.path().join("in.txt");
    let dst = dir.path().join("out.lz4");
    fs::write(&src, b"fresh content").expect("write");
    fs::write(&dst, b"old").expect("write");
    let (src, dst) = (src.to_str().expect("utf-8"), dst.to_str().expect("utf-8"));

    assert!(compress_file(src, dst, &CompressOptions::default()).is_err());
    assert_eq!(fs::read(dst).expect("read"), b"old");

    let opts = CompressOptions {
        overwrite: true,
        ..CompressOptions::default()
    };
    compress_file(src, dst, &opts).expect("compress");
    assert_eq!(
        decompress_frame(&fs::read(dst).expect("read")).expect("decode"),
        b"fresh content"
    );
}

#[test]
fn compress_file_missing_input() {
    let dir = TempDir::new().expect("TempDir::new");
    let src = dir.path().join("absent");
    let dst = dir.path().join("absent.lz4");
    let result = compress_file(
        src.to_str().expect("utf-8"),
        dst.to_str().expect("utf-8"),
        &CompressOptions::default(),
    );
    assert!(result.is_err());
    assert!(!dst.exists());
}
