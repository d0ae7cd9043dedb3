#![no_main]
use libfuzzer_sys::fuzz_target;

use lz4::block_stream::{BlockStreamDecoder, MAGIC};

fuzz_target!(|data: &[u8]| {
    let mut stream = MAGIC.to_vec();
    stream.extend_from_slice(data);
    for stop in [true, false] {
        let decoder: BlockStreamDecoder = BlockStreamDecoder::new().stop_on_empty_block(stop);
        let _ = decoder.decode(data);
        let _ = decoder.decode(&stream);
    }
});
