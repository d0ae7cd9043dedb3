// Unit tests for the shared block decoder: end-of-block rules, offset
// validation, overlapping copies and history windows.

use lz4::block::decompress_core::{copy_match, decode_block, Decoded, OutputLimit};
use lz4::Lz4Error;

fn corrupt(offset: usize) -> Lz4Error {
    Lz4Error::CorruptInput { offset }
}

/// One literal `0x41`, a 994-byte match at distance 1, five more `0x41`.
fn run_of_a() -> Vec<u8> {
    let mut block = vec![0x1F, 0x41, 0x01, 0x00];
    // 994 - 4 - 15 = 975 = 3 * 255 + 210
    block.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xD2]);
    block.push(0x50);
    block.extend_from_slice(&[0x41; 5]);
    block
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlapping copies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn distance_one_match_repeats_a_byte() {
    let block = run_of_a();
    for limit in [OutputLimit::Exact(1000), OutputLimit::Capacity(1000)] {
        let mut dst = vec![0u8; 1000];
        let decoded = decode_block(&block, &mut dst, 0, 0, limit).expect("decode");
        assert_eq!(
            decoded,
            Decoded {
                consumed: block.len(),
                produced: 1000
            }
        );
        assert!(dst.iter().all(|&b| b == 0x41));
    }
}

#[test]
fn copy_match_short_period() {
    let mut buf = *b"xyz..........";
    copy_match(&mut buf, 3, 3, 10);
    assert_eq!(&buf, b"xyzxyzxyzxyzx");
}

#[test]
fn copy_match_non_overlapping() {
    let mut buf = *b"hello-----";
    copy_match(&mut buf, 5, 5, 5);
    assert_eq!(&buf, b"hellohello");
}

// ─────────────────────────────────────────────────────────────────────────────
// Offsets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_offset_is_corrupt() {
    let block = [0x40, b'a', b'b', b'c', b'd', 0x00, 0x00, 0x50, b'v', b'w', b'x', b'y', b'z'];
    let mut dst = [0u8; 32];
    for limit in [OutputLimit::Exact(13), OutputLimit::Capacity(32)] {
        assert_eq!(decode_block(&block, &mut dst, 0, 0, limit), Err(corrupt(5)));
    }
}

#[test]
fn offset_before_output_start_is_corrupt() {
    let block = [0x40, b'a', b'b', b'c', b'd', 0x05, 0x00, 0x50, b'v', b'w', b'x', b'y', b'z'];
    let mut dst = [0u8; 32];
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(32)),
        Err(corrupt(5))
    );
}

#[test]
fn window_start_bounds_history() {
    // Zero literals, a match at distance 6, then five literals.
    let block = [0x00, 0x06, 0x00, 0x50, b'1', b'2', b'3', b'4', b'5'];
    let mut dst = *b"HISTORY\0\0\0\0\0\0\0\0\0";
    let limit = OutputLimit::Exact(9);

    assert_eq!(decode_block(&block, &mut dst, 7, 3, limit), Err(corrupt(1)));

    let decoded = decode_block(&block, &mut dst, 7, 1, limit).expect("decode");
    assert_eq!(decoded.produced, 9);
    assert_eq!(&dst, b"HISTORYISTO12345");
}

// ─────────────────────────────────────────────────────────────────────────────
// End-of-block rules
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn block_ending_in_match_is_corrupt() {
    let block = [0x40, b'a', b'b', b'c', b'd', 0x04, 0x00];
    let mut dst = [0u8; 32];
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(32)),
        Err(corrupt(7))
    );
    assert!(decode_block(&block, &mut dst, 0, 0, OutputLimit::Exact(8)).is_err());
}

#[test]
fn short_tail_after_match_is_corrupt() {
    let block = [0x40, b'a', b'b', b'c', b'd', 0x04, 0x00, 0x40, b'w', b'x', b'y', b'z'];
    let mut dst = [0u8; 32];
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(32)),
        Err(corrupt(7))
    );
}

#[test]
fn short_literal_only_block_is_fine() {
    let block = [0x20, b'o', b'k'];
    let mut dst = [0u8; 2];
    let decoded = decode_block(&block, &mut dst, 0, 0, OutputLimit::Exact(2)).expect("decode");
    assert_eq!(decoded.consumed, 3);
    assert_eq!(&dst, b"ok");
}

#[test]
fn exact_mode_ignores_trailing_source() {
    let mut block = run_of_a();
    let len = block.len();
    block.extend_from_slice(&[0xDE, 0xAD]);
    let mut dst = vec![0u8; 1000];
    let decoded = decode_block(&block, &mut dst, 0, 0, OutputLimit::Exact(1000)).expect("decode");
    assert_eq!(decoded.consumed, len);
}

#[test]
fn capacity_mode_requires_whole_source() {
    let mut block = run_of_a();
    block.extend_from_slice(&[0xDE, 0xAD]);
    let mut dst = vec![0u8; 2000];
    assert!(decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(2000)).is_err());
}

#[test]
fn overflow_differs_by_mode() {
    let block = run_of_a();
    let mut dst = vec![0u8; 1000];
    // Trusting: a match running past the declared length is corruption.
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Exact(500)),
        Err(corrupt(2))
    );
    // Defensive: the same overrun means the destination was too small.
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(500)),
        Err(Lz4Error::DestinationTooSmall {
            needed: None,
            capacity: 500
        })
    );
}

#[test]
fn huge_length_extension_runs_off_the_end() {
    let mut block = vec![0xF0];
    block.extend_from_slice(&[0xFF; 64]);
    let mut dst = [0u8; 16];
    assert_eq!(
        decode_block(&block, &mut dst, 0, 0, OutputLimit::Capacity(16)),
        Err(corrupt(65))
    );
}
