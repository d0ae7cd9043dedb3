//! E2E Test Suite 02: High-Compression API
//!
//! Validates the HC encoder end to end:
//! - compress_hc at every level, decoded by both block decoders
//! - level clamping at both ends of the range
//! - HC output is never larger than the fast encoder's on redundant data
//! - HcEncoder reuse across unrelated inputs

extern crate lz4;

use lz4::hc::{compress_hc_to_vec, HcEncoder, HC_CLEVEL_DEFAULT, HC_CLEVEL_MAX, HC_CLEVEL_MIN};
use lz4::{compress_hc, decompress, decompress_fast, max_compressed_length};

fn text(len: usize) -> Vec<u8> {
    let words = [
        "alpha ", "bravo ", "charlie ", "delta ", "echo ", "foxtrot ", "golf ", "hotel ",
        "india ", "juliett ", "kilo ", "lima ",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[(i * 7 + i / 13) % words.len()].as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

fn check(input: &[u8], compressed: &[u8]) {
    let mut safe = vec![0u8; input.len()];
    assert_eq!(decompress(compressed, &mut safe), Ok(input.len()));
    assert_eq!(safe, input);
    let mut fast = vec![0u8; input.len()];
    assert_eq!(decompress_fast(compressed, &mut fast), Ok(compressed.len()));
    assert_eq!(fast, input);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: every level round-trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_all_levels_roundtrip() {
    let input = text(150_000);
    for level in HC_CLEVEL_MIN..=HC_CLEVEL_MAX {
        let mut dst = vec![0u8; max_compressed_length(input.len())];
        let n = compress_hc(&input, &mut dst, level).expect("compression should succeed");
        check(&input, &dst[..n]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: level clamping
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_level_clamping() {
    let input = text(20_000);
    let default = compress_hc_to_vec(&input, HC_CLEVEL_DEFAULT).expect("compress");
    assert_eq!(compress_hc_to_vec(&input, 0).expect("compress"), default);
    assert_eq!(compress_hc_to_vec(&input, -5).expect("compress"), default);

    let max = compress_hc_to_vec(&input, HC_CLEVEL_MAX).expect("compress");
    assert_eq!(compress_hc_to_vec(&input, 99).expect("compress"), max);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: HC beats the fast encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_not_larger_than_fast() {
    let input = text(100_000);
    let fast = lz4::block::compress::compress_to_vec(&input).expect("compress");
    let hc = compress_hc_to_vec(&input, HC_CLEVEL_DEFAULT).expect("compress");
    assert!(hc.len() <= fast.len(), "hc {} vs fast {}", hc.len(), fast.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: encoder reuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_encoder_reuse() {
    let mut encoder = HcEncoder::new(6);
    assert_eq!(encoder.level(), 6);
    let inputs = [text(70_000), vec![9u8; 5000], Vec::new(), text(300)];
    for input in &inputs {
        let mut dst = vec![0u8; max_compressed_length(input.len())];
        let n = encoder.compress(input, &mut dst).expect("compress");
        assert_eq!(&dst[..n], &compress_hc_to_vec(input, 6).expect("compress")[..]);
        check(input, &dst[..n]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: undersized destination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_destination_too_small() {
    let input = text(10_000);
    let reference = compress_hc_to_vec(&input, 9).expect("compress");
    let mut short = vec![0u8; reference.len() - 1];
    assert!(compress_hc(&input, &mut short, 9).is_err());
    let mut exact = vec![0u8; reference.len()];
    assert_eq!(compress_hc(&input, &mut exact, 9), Ok(reference.len()));
    assert_eq!(exact, reference);
}
