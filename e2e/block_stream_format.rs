//! E2E Test Suite 04: "LZ4Block" Stream Format
//!
//! Validates the block-stream container end to end:
//! - round trips across block sizes and compressors
//! - record layout (magic, token, lengths, masked checksum)
//! - a stream assembled by hand the way other producers write it
//! - incremental writes with flushes
//! - stop-at-end-mark versus concatenated decoding

extern crate lz4;

use lz4::block_stream::{
    compress_block_stream, compress_block_stream_with, decompress_block_stream,
    BlockStreamDecoder, BlockStreamEncoder, MAGIC,
};
use lz4::codec::Compressor;
use lz4::xxhash::xxh32_oneshot;

fn data(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"stream-of-records;"[i % 18] ^ (i / 5000) as u8).collect()
}

fn le32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_block_sizes() {
    let input = data(150_000);
    for block_size in [64, 1000, 1 << 16, 1 << 20] {
        for compressor in [Compressor::fast(), Compressor::hc(9)] {
            let stream =
                compress_block_stream_with(&input, block_size, compressor).expect("compress");
            assert!(stream.starts_with(MAGIC));
            assert_eq!(
                decompress_block_stream(&stream).expect("decompress"),
                input,
                "block size {block_size}, {compressor}"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: record layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_record_layout() {
    let input = data(3000);
    let stream = compress_block_stream(&input, 1 << 16).expect("compress");

    assert_eq!(&stream[..8], b"LZ4Block");
    // Compressed method, level 6 for 64 KB blocks.
    assert_eq!(stream[8], 0x26);
    let compressed = le32(&stream, 9) as usize;
    assert_eq!(le32(&stream, 13) as usize, input.len());
    assert_eq!(le32(&stream, 17), xxh32_oneshot(&input, 0x9747_B28C) & 0x0FFF_FFFF);

    let end = 21 + compressed;
    assert_eq!(&stream[end..end + 8], b"LZ4Block");
    assert_eq!(stream[end + 8], 0x16);
    assert_eq!(&stream[end + 9..], &[0u8; 12]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a hand-assembled stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decodes_hand_built_stream() {
    let content = b"raw record";
    let mut stream = MAGIC.to_vec();
    stream.push(0x10);
    stream.extend_from_slice(&(content.len() as u32).to_le_bytes());
    stream.extend_from_slice(&(content.len() as u32).to_le_bytes());
    stream.extend_from_slice(&(xxh32_oneshot(content, 0x9747_B28C) & 0x0FFF_FFFF).to_le_bytes());
    stream.extend_from_slice(content);
    stream.extend_from_slice(MAGIC);
    stream.push(0x10);
    stream.extend_from_slice(&[0u8; 12]);
    assert_eq!(decompress_block_stream(&stream).expect("decompress"), content);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: incremental encoding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_incremental_writes_and_flush() {
    let input = data(40_000);
    let mut encoder: BlockStreamEncoder =
        BlockStreamEncoder::with_block_size(4096, Compressor::fast()).expect("encoder");
    let mut stream = Vec::new();
    for (i, piece) in input.chunks(999).enumerate() {
        encoder.write(piece, &mut stream).expect("write");
        if i % 10 == 9 {
            encoder.flush(&mut stream).expect("flush");
        }
    }
    encoder.finish(&mut stream).expect("finish");
    assert_eq!(decompress_block_stream(&stream).expect("decompress"), input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: end marks and concatenation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_concatenated_streams() {
    let mut joined = compress_block_stream(b"first|", 64).expect("compress");
    let first_len = joined.len();
    joined.extend(compress_block_stream(b"second", 64).expect("compress"));

    let lenient: BlockStreamDecoder = BlockStreamDecoder::new().stop_on_empty_block(false);
    assert_eq!(lenient.decode(&joined).expect("decode"), b"first|second");

    let stopping: BlockStreamDecoder = BlockStreamDecoder::new();
    let mut out = Vec::new();
    assert_eq!(stopping.decode_into(&joined, &mut out).expect("decode"), first_len);
    assert_eq!(out, b"first|");
}

#[test]
fn test_corrupted_stream_is_rejected() {
    let mut stream = compress_block_stream(&data(5000), 1 << 16).expect("compress");
    stream[17] ^= 0x01;
    assert!(decompress_block_stream(&stream).is_err());
    let truncated = &stream[..stream.len() - 30];
    assert!(decompress_block_stream(truncated).is_err());
}
