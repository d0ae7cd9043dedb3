#![no_main]
use libfuzzer_sys::fuzz_target;

use lz4::codec::Compressor;
use lz4::frame::{decompress_frame, BlockSizeId, FrameEncoder, Preferences};

fuzz_target!(|data: &[u8]| {
    // Two leading bytes choose the frame flags and the update chunk size.
    let [flags, chunk, input @ ..] = data else {
        return;
    };
    let block_size = match flags & 0x03 {
        0 => BlockSizeId::Max64Kb,
        1 => BlockSizeId::Max256Kb,
        2 => BlockSizeId::Max1Mb,
        _ => BlockSizeId::Max4Mb,
    };
    let compressor = if flags & 0x04 != 0 {
        Compressor::hc(i32::from(flags >> 4))
    } else {
        Compressor::fast()
    };
    let prefs = Preferences::default()
        .with_block_size(block_size)
        .with_block_checksum(flags & 0x08 != 0)
        .with_content_size((flags & 0x10 != 0).then_some(input.len() as u64))
        .with_compressor(compressor);

    let mut encoder = FrameEncoder::new(prefs);
    let mut frame = Vec::new();
    encoder.begin(&mut frame).expect("begin");
    for piece in input.chunks(usize::from(*chunk) * 97 + 1) {
        encoder.update(piece, &mut frame).expect("update");
    }
    encoder.finish(&mut frame).expect("finish");

    let recovered = decompress_frame(&frame).expect("own frames decode");
    assert_eq!(recovered, input);
});
