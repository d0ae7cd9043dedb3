//! E2E Test Suite 01: Block One-Shot API
//!
//! Validates the block functions re-exported at the crate root:
//! - compress / compress_into
//! - decompress / decompress_into (defensive)
//! - decompress_fast / decompress_fast_into (trusting)
//! - compress_prepend_size / decompress_size_prepended
//! - max_compressed_length

extern crate lz4;

use lz4::{
    compress, compress_into, compress_prepend_size, decompress, decompress_fast,
    decompress_fast_into, decompress_into, decompress_size_prepended, max_compressed_length,
    Lz4Error,
};

fn corpus() -> Vec<Vec<u8>> {
    let mut inputs = vec![
        Vec::new(),
        b"x".to_vec(),
        b"The quick brown fox jumps over the lazy dog. ".repeat(20),
        vec![0u8; 100_000],
        (0..=255u8).cycle().take(70_000).collect(),
    ];
    let mut x = 0x1234_5678u32;
    inputs.push(
        (0..50_000)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (x >> 16) as u8
            })
            .collect(),
    );
    inputs
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round trips through both decoders
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_both_decoders() {
    for input in corpus() {
        let mut compressed = vec![0u8; max_compressed_length(input.len())];
        let n = compress(&input, &mut compressed).expect("compression should succeed");
        assert!(n <= max_compressed_length(input.len()));

        let mut safe = vec![0u8; input.len()];
        assert_eq!(decompress(&compressed[..n], &mut safe), Ok(input.len()));
        assert_eq!(safe, input);

        let mut fast = vec![0u8; input.len()];
        assert_eq!(decompress_fast(&compressed[..n], &mut fast), Ok(n));
        assert_eq!(fast, input);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: repetitive data compresses well
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repetitive_data_compresses() {
    let zeros = vec![0u8; 100_000];
    let mut compressed = vec![0u8; max_compressed_length(zeros.len())];
    let n = compress(&zeros, &mut compressed).expect("compress");
    assert!(n < 500, "100 000 zeros took {n} bytes");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a block produced by another LZ4 encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decodes_reference_block() {
    // "abcabcabcabcabcabcabcabc!!!!!" as a reference encoder writes it:
    // three literals, a 21-byte match at distance 3, five literals.
    let block = [
        0x3F, b'a', b'b', b'c', 0x03, 0x00, 0x02, 0x50, b'!', b'!', b'!', b'!', b'!',
    ];
    let mut out = [0u8; 29];
    assert_eq!(decompress(&block, &mut out), Ok(29));
    assert_eq!(&out, b"abcabcabcabcabcabcabcabc!!!!!");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: offset-based variants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_into_variants_with_offsets() {
    let payload = b"offset payload, offset payload, offset payload".to_vec();
    let mut src = vec![0u8; 16];
    src.extend_from_slice(&payload);

    let mut packed = vec![0u8; 8 + max_compressed_length(payload.len())];
    let cap = packed.len() - 8;
    let n = compress_into(&src, 16, payload.len(), &mut packed, 8, cap).expect("compress");

    let mut out = vec![0u8; 4 + payload.len()];
    let got = decompress_into(&packed, 8, n, &mut out, 4, payload.len()).expect("decompress");
    assert_eq!(got, payload.len());
    assert_eq!(&out[4..], &payload[..]);

    let mut out = vec![0u8; payload.len()];
    let consumed =
        decompress_fast_into(&packed, 8, &mut out, 0, payload.len()).expect("decompress");
    assert_eq!(consumed, n);
    assert_eq!(out, payload);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: size-prefixed blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_size_prefixed_roundtrip() {
    for input in corpus() {
        let packed = compress_prepend_size(&input).expect("compress");
        assert_eq!(&packed[..4], &(input.len() as u32).to_le_bytes());
        assert_eq!(decompress_size_prepended(&packed).expect("decompress"), input);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_small_destination_errors() {
    let input = b"some input that does not fit".repeat(4);
    let mut tiny = [0u8; 8];
    assert!(matches!(
        compress(&input, &mut tiny),
        Err(Lz4Error::DestinationTooSmall { .. })
    ));

    let mut compressed = vec![0u8; max_compressed_length(input.len())];
    let n = compress(&input, &mut compressed).expect("compress");
    let mut short = vec![0u8; input.len() - 1];
    assert!(matches!(
        decompress(&compressed[..n], &mut short),
        Err(Lz4Error::DestinationTooSmall { .. })
    ));
}

#[test]
fn test_corrupt_block_is_reported() {
    let err = decompress(&[0x40, b'a', b'b'], &mut [0u8; 16]).expect_err("truncated");
    assert!(err.is_corrupt());
    assert!(err.to_string().contains("offset"));
}
