#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the encoder: fast with some acceleration, or an HC level.
    let Some((&selector, input)) = data.split_first() else {
        return;
    };
    let mut compressed = vec![0u8; lz4::max_compressed_length(input.len())];
    let n = if selector & 0x80 == 0 {
        lz4::block::compress::compress_fast(input, &mut compressed, u32::from(selector) + 1)
    } else {
        lz4::compress_hc(input, &mut compressed, i32::from(selector & 0x1F))
    }
    .expect("the bound always fits");
    let compressed = &compressed[..n];

    let mut safe = vec![0u8; input.len()];
    assert_eq!(lz4::decompress(compressed, &mut safe), Ok(input.len()));
    assert_eq!(safe, input);

    let mut fast = vec![0u8; input.len()];
    assert_eq!(lz4::decompress_fast(compressed, &mut fast), Ok(n));
    assert_eq!(fast, input);
});
