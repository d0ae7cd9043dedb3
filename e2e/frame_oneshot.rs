//! E2E Test Suite 03: Frame Format
//!
//! Validates the frame container end to end:
//! - compress_frame / decompress_frame round trips for many sizes
//! - byte-exact headers for interoperability with other LZ4 tools
//! - a frame written by hand the way a reference encoder lays it out
//! - streaming encoder output equals the one-shot output
//! - concatenated and skippable frames

extern crate lz4;

use lz4::codec::Compressor;
use lz4::frame::{
    compress_frame, compress_frame_bound, decompress_frame, frame_info, write_skippable_frame,
    BlockSizeId, ContentChecksum, FrameEncoder, FrameType, Preferences,
};
use lz4::xxhash::xxh32_oneshot;

/// LZ4 frame magic number, little-endian.
const LZ4_FRAME_MAGIC: [u8; 4] = [0x04, 0x22, 0x4D, 0x18];

fn data(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (((i * 31) ^ (i >> 9)) % 61) as u8 + b' ')
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round trips across sizes and block sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_sizes() {
    for id in [BlockSizeId::Max64Kb, BlockSizeId::Max256Kb, BlockSizeId::Max4Mb] {
        let prefs = Preferences::default().with_block_size(id);
        for len in [0, 1, 13, 65_535, 65_536, 65_537, 300_000] {
            let input = data(len);
            let frame = compress_frame(&input, &prefs).expect("compress");
            assert_eq!(&frame[..4], &LZ4_FRAME_MAGIC);
            assert!(frame.len() <= compress_frame_bound(len, &prefs));
            assert_eq!(decompress_frame(&frame).expect("decompress"), input, "len {len}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: header bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_default_header_bytes() {
    let frame = compress_frame(b"", &Preferences::default()).expect("compress");
    assert_eq!(
        frame,
        [0x04, 0x22, 0x4D, 0x18, 0x64, 0x40, 0xA7, 0, 0, 0, 0, 0x05, 0x5D, 0xCC, 0x02]
    );
}

#[test]
fn test_header_reports_preferences() {
    let prefs = Preferences::default()
        .with_block_size(BlockSizeId::Max1Mb)
        .with_content_checksum(false)
        .with_content_size(Some(5));
    let frame = compress_frame(b"12345", &prefs).expect("compress");
    let info = frame_info(&frame).expect("header");
    assert_eq!(info.frame_type, FrameType::Frame);
    assert_eq!(info.block_size_id, BlockSizeId::Max1Mb);
    assert_eq!(info.content_checksum, ContentChecksum::Disabled);
    assert_eq!(info.content_size, Some(5));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a hand-assembled frame
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decodes_hand_built_frame() {
    let content = b"hand built frame";
    let mut frame = LZ4_FRAME_MAGIC.to_vec();
    frame.extend_from_slice(&[0x64, 0x40, 0xA7]);
    // One uncompressed block.
    frame.extend_from_slice(&(0x8000_0000u32 | content.len() as u32).to_le_bytes());
    frame.extend_from_slice(content);
    frame.extend_from_slice(&[0, 0, 0, 0]);
    frame.extend_from_slice(&xxh32_oneshot(content, 0).to_le_bytes());
    assert_eq!(decompress_frame(&frame).expect("decompress"), content);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: streaming equals one-shot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_streaming_matches_oneshot() {
    let input = data(200_000);
    for compressor in [Compressor::fast(), Compressor::hc(5)] {
        let prefs = Preferences::default()
            .with_block_checksum(true)
            .with_compressor(compressor);
        let oneshot = compress_frame(&input, &prefs).expect("compress");

        let mut encoder = FrameEncoder::new(prefs);
        let mut streamed = Vec::new();
        encoder.begin(&mut streamed).expect("begin");
        for piece in input.chunks(7_777) {
            encoder.update(piece, &mut streamed).expect("update");
        }
        encoder.finish(&mut streamed).expect("finish");
        assert_eq!(streamed, oneshot, "{compressor}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: concatenation and skippable frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_concatenated_frames() {
    let prefs = Preferences::default();
    let mut stream = compress_frame(b"one, ", &prefs).expect("compress");
    write_skippable_frame(0x0A, &[1, 2, 3, 4, 5], &mut stream).expect("skippable");
    stream.extend(compress_frame(&data(100_000), &prefs).expect("compress"));

    let mut expected = b"one, ".to_vec();
    expected.extend(data(100_000));
    assert_eq!(decompress_frame(&stream).expect("decompress"), expected);
}

#[test]
fn test_corrupted_frame_is_rejected() {
    let mut frame = compress_frame(&data(5000), &Preferences::default()).expect("compress");
    let last = frame.len() - 1;
    frame[last] ^= 0x20;
    assert!(decompress_frame(&frame).is_err());
    // The header checksum covers the descriptor.
    let mut frame = compress_frame(&data(5000), &Preferences::default()).expect("compress");
    frame[5] ^= 0x70;
    assert!(decompress_frame(&frame).is_err());
}
