//! E2E Test Suite 06: Error Handling & Edge Cases
//!
//! Every decoder must turn malformed input into an error value carrying a
//! usable offset, never a panic:
//! - block decoders on truncated and mutated blocks
//! - frame decoder causes and their source chains
//! - block-stream decoder causes
//! - codec factory decoders on mismatched lengths

use std::error::Error as _;

use lz4::block_stream::{compress_block_stream, BlockStreamCause, BlockStreamError};
use lz4::codec::{BlockDecompressor, Factory};
use lz4::frame::{compress_frame, CorruptionCause, FrameDecoder, FrameError, Preferences};
use lz4::{compress_prepend_size, decompress, decompress_fast, decompress_size_prepended, Lz4Error};

fn sample() -> Vec<u8> {
    b"error handling sample text; error handling sample text. ".repeat(50)
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 1: every truncation of a block fails without panicking
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_truncated_blocks() {
    let input = sample();
    let compressed = lz4::block::compress::compress_to_vec(&input).expect("compress");
    for cut in 0..compressed.len() {
        let mut dst = vec![0u8; input.len()];
        // A cut that happens to end on a literal run is a shorter valid block.
        if let Ok(n) = decompress(&compressed[..cut], &mut dst) {
            assert!(n < input.len(), "cut {cut} decoded everything");
            assert_eq!(&dst[..n], &input[..n]);
        }
        assert!(decompress_fast(&compressed[..cut], &mut dst).is_err(), "cut {cut}");
    }
}

#[test]
fn test_every_single_byte_mutation() {
    let input = sample();
    let compressed = lz4::block::compress::compress_to_vec(&input).expect("compress");
    for i in 0..compressed.len() {
        for flip in [0x01u8, 0x80, 0xFF] {
            let mut bad = compressed.clone();
            bad[i] ^= flip;
            let mut dst = vec![0u8; input.len() + 64];
            if let Err(Lz4Error::CorruptInput { offset }) = decompress(&bad, &mut dst) {
                assert!(offset <= bad.len());
            }
            let mut exact = vec![0u8; input.len()];
            let _ = decompress_fast(&bad, &mut exact);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 2: size-prefixed blocks
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_size_prefix_errors() {
    assert!(matches!(
        decompress_size_prepended(&[1, 0]),
        Err(Lz4Error::InvalidArgument(_))
    ));
    let mut packed = compress_prepend_size(&sample()).expect("compress");
    packed[0] = packed[0].wrapping_add(1);
    assert!(decompress_size_prepended(&packed).is_err());
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 3: frame errors
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_frame_error_chain() {
    let mut frame = compress_frame(&sample(), &Preferences::default()).expect("compress");
    let last = frame.len() - 1;
    frame[last] ^= 0x01;
    let err = FrameDecoder::new().decode(&frame).expect_err("checksum");
    let FrameError::StreamCorrupted { offset, ref cause } = err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(offset, frame.len() - 4);
    assert!(matches!(cause, CorruptionCause::ContentChecksum { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_frame_block_error_keeps_block_source() {
    // Header, then one compressed block holding a literal run that is cut short.
    let mut frame = vec![0x04, 0x22, 0x4D, 0x18, 0x60, 0x40, 0x82];
    frame.extend_from_slice(&3u32.to_le_bytes());
    frame.extend_from_slice(&[0x40, b'a', b'b']);
    frame.extend_from_slice(&[0, 0, 0, 0]);

    let err = FrameDecoder::new().decode(&frame).expect_err("corrupt block");
    assert!(matches!(
        err.cause(),
        Some(CorruptionCause::Block {
            source: Lz4Error::CorruptInput { offset: 1 }
        })
    ));
    let block_err = err.source().and_then(|cause| cause.source());
    assert!(block_err.is_some());
}

#[test]
fn test_frame_truncations() {
    let frame = compress_frame(&sample(), &Preferences::default()).expect("compress");
    for cut in 0..frame.len() {
        assert!(
            FrameDecoder::new().decode(&frame[..cut]).is_err(),
            "cut {cut} decoded"
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 4: block-stream errors
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_block_stream_errors() {
    let stream = compress_block_stream(&sample(), 1024).expect("compress");

    let mut bad_magic = stream.clone();
    bad_magic[0] = b'l';
    let err = lz4::block_stream::decompress_block_stream(&bad_magic).expect_err("magic");
    assert!(matches!(
        err,
        BlockStreamError::StreamCorrupted {
            offset: 0,
            cause: BlockStreamCause::BadMagic
        }
    ));

    let mut bad_method = stream.clone();
    bad_method[8] = 0x36;
    let err = lz4::block_stream::decompress_block_stream(&bad_method).expect_err("method");
    assert!(matches!(err.cause(), Some(BlockStreamCause::UnknownMethod(0x36))));

    for cut in 0..stream.len() {
        assert!(lz4::block_stream::decompress_block_stream(&stream[..cut]).is_err());
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 5: factory decoders
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_factory_decoders_check_lengths() {
    let factory = Factory::fastest();
    let input = sample();
    let compressed = lz4::block::compress::compress_to_vec(&input).expect("compress");

    for decoder in [factory.trusting_decompressor(), factory.defensive_decompressor()] {
        let mut exact = vec![0u8; input.len()];
        decoder.decompress_exact(&compressed, &mut exact).expect("decode");
        assert_eq!(exact, input);

        let mut short = vec![0u8; input.len() - 1];
        assert!(decoder.decompress_exact(&compressed, &mut short).is_err());
    }
}
