// Unit tests for frame decompression: flag combinations, concatenated and
// skippable frames, and every corruption path.

use lz4::codec::Compressor;
use lz4::frame::header::{header_checksum, write_header};
use lz4::frame::{
    compress_frame, decompress_frame, frame_info, write_skippable_frame, BlockChecksum,
    BlockSizeId, ContentChecksum, CorruptionCause, FrameDecoder, FrameEncoder, FrameError,
    FrameInfo, FrameType, Preferences,
};
use lz4::xxhash::StreamingChecksum;
use lz4::Lz4Error;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn sample(len: usize) -> Vec<u8> {
    let mut x = 0x2545_F491u32;
    (0..len)
        .map(|i| {
            if i % 3000 < 1500 {
                b"abcdefghijklmnopqrstuvwxyz"[i % 26]
            } else {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            }
        })
        .collect()
}

fn corruption(result: Result<Vec<u8>, FrameError>) -> (usize, CorruptionCause) {
    match result {
        Err(FrameError::StreamCorrupted { offset, cause }) => (offset, cause),
        other => panic!("expected corruption, got {other:?}"),
    }
}

/// Header without checksums followed by the given raw length words and bodies.
fn hand_frame(info: FrameInfo, blocks: &[(u32, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&info, &mut out);
    for (word, body) in blocks {
        out.extend_from_slice(&word.to_le_bytes());
        out.extend_from_slice(body);
    }
    out
}

fn plain_info() -> FrameInfo {
    FrameInfo {
        content_checksum: ContentChecksum::Disabled,
        ..FrameInfo::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_option_combination_round_trips() {
    let input = sample(150_000);
    for id in [
        BlockSizeId::Max64Kb,
        BlockSizeId::Max256Kb,
        BlockSizeId::Max1Mb,
        BlockSizeId::Max4Mb,
    ] {
        for flags in 0..8u8 {
            for compressor in [Compressor::fast(), Compressor::hc(3)] {
                let prefs = Preferences::default()
                    .with_block_size(id)
                    .with_block_checksum(flags & 1 != 0)
                    .with_content_checksum(flags & 2 != 0)
                    .with_content_size((flags & 4 != 0).then_some(0))
                    .with_compressor(compressor);
                let frame = compress_frame(&input, &prefs).expect("compress");
                let info = frame_info(&frame).expect("info");
                assert_eq!(info.block_size_id, id);
                assert_eq!(info.content_size.is_some(), flags & 4 != 0);
                assert_eq!(
                    decompress_frame(&frame).expect("decompress"),
                    input,
                    "{id:?} flags {flags} {compressor}"
                );
            }
        }
    }
}

#[test]
fn empty_frame_decodes_to_nothing() {
    let frame = compress_frame(&[], &Preferences::default()).expect("compress");
    assert_eq!(decompress_frame(&frame).expect("decompress"), Vec::<u8>::new());
}

#[test]
fn concatenated_frames_and_skippable_frames() {
    let a = sample(70_000);
    let b = b"second".to_vec();
    let mut stream = Vec::new();
    write_skippable_frame(0, b"leading metadata", &mut stream).expect("skip");
    stream.extend(compress_frame(&a, &Preferences::default()).expect("compress"));
    write_skippable_frame(0xF, &[], &mut stream).expect("skip");
    stream.extend(
        compress_frame(&b, &Preferences::default().with_block_checksum(true)).expect("compress"),
    );

    let mut expected = a;
    expected.extend_from_slice(&b);
    assert_eq!(decompress_frame(&stream).expect("decompress"), expected);
}

#[test]
fn skippable_only_stream_is_empty() {
    let mut stream = Vec::new();
    write_skippable_frame(3, b"payload", &mut stream).expect("skip");
    assert_eq!(decompress_frame(&stream).expect("decompress"), Vec::<u8>::new());
    let info = frame_info(&stream).expect("info");
    assert_eq!(info.frame_type, FrameType::Skippable);
    assert_eq!(info.content_size, Some(7));
}

#[test]
fn decode_into_appends_and_decode_frame_reports_length() {
    let frame = compress_frame(b"appended", &Preferences::default()).expect("compress");
    let mut out = b"prefix:".to_vec();
    let decoder = FrameDecoder::new();
    assert_eq!(decoder.decode_into(&frame, &mut out).expect("decode"), 8);
    assert_eq!(out, b"prefix:appended");

    let mut doubled = frame.clone();
    doubled.extend_from_slice(&frame);
    let mut out = Vec::new();
    assert_eq!(decoder.decode_frame(&doubled, frame.len(), &mut out).expect("decode"), frame.len());
    assert_eq!(out, b"appended");
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation and framing errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_truncated() {
    let (offset, cause) = corruption(decompress_frame(&[]));
    assert_eq!((offset, cause), (0, CorruptionCause::Truncated { needed: 4 }));
}

#[test]
fn every_truncation_is_detected() {
    let prefs = Preferences::default().with_block_checksum(true);
    let frame = compress_frame(&sample(2000), &prefs).expect("compress");
    for len in 0..frame.len() {
        assert!(decompress_frame(&frame[..len]).is_err(), "len {len}");
    }
}

#[test]
fn trailing_garbage_is_bad_magic() {
    let mut frame = compress_frame(b"data", &Preferences::default()).expect("compress");
    let end = frame.len();
    frame.extend_from_slice(&[1, 2, 3, 4, 5]);
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, end);
    assert_eq!(cause, CorruptionCause::BadMagic(0x0403_0201));
}

#[test]
fn skippable_payload_must_be_present() {
    let mut stream = Vec::new();
    write_skippable_frame(0, &[0u8; 10], &mut stream).expect("skip");
    stream.truncate(12);
    let (offset, cause) = corruption(decompress_frame(&stream));
    assert_eq!((offset, cause), (8, CorruptionCause::Truncated { needed: 6 }));
}

#[test]
fn oversized_block_word() {
    let frame = hand_frame(plain_info(), &[(0x0001_0001, &[])]);
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, 7);
    assert_eq!(
        cause,
        CorruptionCause::BlockTooLarge {
            size: 65_537,
            max: 65_536
        }
    );
}

#[test]
fn raw_block_of_maximum_size_is_accepted() {
    let body = vec![9u8; 65_536];
    let frame = hand_frame(plain_info(), &[(0x8001_0000, &body), (0, &[])]);
    assert_eq!(decompress_frame(&frame).expect("decompress"), body);
}

#[test]
fn malformed_block_reports_block_cause() {
    // A 4-literal run that ends with a truncated offset.
    let block = [0x40, b'a', b'b', b'c', b'd', 0x01];
    let frame = hand_frame(plain_info(), &[(block.len() as u32, &block), (0, &[])]);
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, 11);
    assert_eq!(
        cause,
        CorruptionCause::Block {
            source: Lz4Error::CorruptInput { offset: 5 }
        }
    );
}

#[test]
fn declared_content_size_is_checked() {
    let info = FrameInfo {
        content_size: Some(10),
        ..plain_info()
    };
    let frame = hand_frame(info, &[(0x8000_0005, b"Hello"), (0, &[])]);
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, 0);
    assert_eq!(
        cause,
        CorruptionCause::ContentSize {
            declared: 10,
            actual: 5
        }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksums
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn block_checksum_mismatch() {
    let prefs = Preferences::default()
        .with_block_checksum(true)
        .with_content_checksum(false);
    let mut frame = compress_frame(b"Hello", &prefs).expect("compress");
    frame[16] ^= 1;
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, 16);
    assert!(matches!(cause, CorruptionCause::BlockChecksum { .. }));

    let unchecked = FrameDecoder::new().verify_checksums(false);
    assert_eq!(unchecked.decode(&frame).expect("decode"), b"Hello");
}

#[test]
fn content_checksum_mismatch() {
    let mut frame = compress_frame(b"Hello", &Preferences::default()).expect("compress");
    let pos = frame.len() - 4;
    frame[pos] ^= 0x80;
    let (offset, cause) = corruption(decompress_frame(&frame));
    assert_eq!(offset, pos);
    assert!(matches!(cause, CorruptionCause::ContentChecksum { .. }));

    let unchecked = FrameDecoder::default().verify_checksums(false);
    assert_eq!(unchecked.decode(&frame).expect("decode"), b"Hello");
}

#[test]
fn header_checksum_is_always_verified() {
    let mut frame = compress_frame(b"Hello", &Preferences::default()).expect("compress");
    frame[6] = header_checksum(&frame[4..6]).wrapping_add(1);
    let unchecked = FrameDecoder::new().verify_checksums(false);
    assert!(matches!(
        unchecked.decode(&frame).map_err(|e| e.cause().cloned()),
        Err(Some(CorruptionCause::HeaderChecksum { .. }))
    ));
}

/// Byte sum, to show the containers only depend on the checksum trait.
struct ByteSum(u32);

impl StreamingChecksum for ByteSum {
    fn new(seed: u32) -> Self {
        ByteSum(seed)
    }
    fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_add(b as u32);
        }
    }
    fn digest(&self) -> u32 {
        self.0
    }
}

#[test]
fn alternative_checksum_plugs_in() {
    let prefs = Preferences::default().with_block_checksum(true);
    let mut encoder: FrameEncoder<ByteSum> = FrameEncoder::with_checksum(prefs);
    let mut frame = Vec::new();
    encoder.begin(&mut frame).expect("begin");
    encoder.update(b"abc", &mut frame).expect("update");
    encoder.finish(&mut frame).expect("finish");
    assert_eq!(&frame[frame.len() - 4..], &(97u32 + 98 + 99).to_le_bytes());

    let decoder: FrameDecoder<ByteSum> = FrameDecoder::with_checksum();
    assert_eq!(decoder.decode(&frame).expect("decode"), b"abc");
    assert!(decompress_frame(&frame).is_err());
}

#[test]
fn frame_info_reads_descriptor() {
    let prefs = Preferences::default()
        .with_block_size(BlockSizeId::Max256Kb)
        .with_block_checksum(true)
        .with_content_size(Some(0));
    let frame = compress_frame(b"xyz", &prefs).expect("compress");
    let info = frame_info(&frame).expect("info");
    assert_eq!(
        info,
        FrameInfo {
            block_size_id: BlockSizeId::Max256Kb,
            block_checksum: BlockChecksum::Enabled,
            content_checksum: ContentChecksum::Enabled,
            content_size: Some(3),
            frame_type: FrameType::Frame,
        }
    );
}
