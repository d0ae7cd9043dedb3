//! Streaming 32-bit checksum used by the container formats.
//!
//! The containers only need `new(seed)`, `update(bytes)` and `digest()`, so
//! they are generic over [`StreamingChecksum`].  [`XxHash32`], backed by the
//! `xxhash-rust` crate, is the implementation both wire formats specify.

use xxhash_rust::xxh32::Xxh32;

/// A seeded streaming 32-bit hash.
pub trait StreamingChecksum {
    fn new(seed: u32) -> Self;
    fn update(&mut self, bytes: &[u8]);
    fn digest(&self) -> u32;

    /// Hashes `bytes` in one call.
    fn oneshot(bytes: &[u8], seed: u32) -> u32
    where
        Self: Sized,
    {
        let mut state = Self::new(seed);
        state.update(bytes);
        state.digest()
    }
}

/// XXH32 streaming state.
#[derive(Clone)]
pub struct XxHash32(Xxh32);

impl StreamingChecksum for XxHash32 {
    fn new(seed: u32) -> Self {
        XxHash32(Xxh32::new(seed))
    }

    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn digest(&self) -> u32 {
        self.0.digest()
    }

    fn oneshot(bytes: &[u8], seed: u32) -> u32 {
        xxhash_rust::xxh32::xxh32(bytes, seed)
    }
}

/// One-shot XXH32.
///
/// `xxh32_oneshot(b"", 0) == 0x02CC5D05`.
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}
