#![no_main]
use libfuzzer_sys::fuzz_target;

use lz4::frame::{decompress_frame, frame_info, FrameDecoder};

fuzz_target!(|data: &[u8]| {
    let _ = frame_info(data);
    let _ = decompress_frame(data);

    // Same input behind a valid magic, with checksum verification off so the
    // block decoder sees more of the mutated payloads.
    let mut framed = vec![0x04, 0x22, 0x4D, 0x18];
    framed.extend_from_slice(data);
    let decoder: FrameDecoder = FrameDecoder::new().verify_checksums(false);
    let _ = decoder.decode(&framed);
});
