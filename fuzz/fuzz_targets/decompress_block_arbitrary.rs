#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    for len in [0usize, 16, 4096, data.len(), data.len().saturating_mul(255).min(1 << 20)] {
        let mut dst = vec![0u8; len];
        if let Ok(n) = lz4::decompress(data, &mut dst) {
            assert!(n <= len);
        }
        if let Ok(consumed) = lz4::decompress_fast(data, &mut dst) {
            assert!(consumed <= data.len());
        }
    }
    let _ = lz4::decompress_size_prepended(data);
});
