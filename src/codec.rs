//! Compressor and decompressor flavours behind one capability interface.
//!
//! [`Compressor`] is the closed set of block compressors (fast with an
//! acceleration factor, HC with a level).  It is plain configuration; call
//! [`Compressor::encoder`] to get an [`Encoder`] that owns the scratch
//! tables and implements [`BlockCompressor`].  The container encoders hold an
//! `Encoder` and reuse it for every block.
//!
//! [`Factory`] hands out compressors and decompressors for the execution
//! backend chosen by [`Backend::probe`].  Only the pure Rust backend is
//! built into this crate, so the probe always settles on it.

use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::block::compress::{FastEncoder, ACCELERATION_DEFAULT};
use crate::block::decompress_api::{decompress, decompress_fast};
use crate::block::types::max_compressed_length;
use crate::error::Lz4Error;
use crate::hc::types::normalize_level;
use crate::hc::HcEncoder;

/// Anything that turns one input into one LZ4 block.
pub trait BlockCompressor {
    /// Compresses `src` into `dst`, returning the encoded length.
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error>;

    /// Worst-case encoded size of `input_len` bytes.
    fn max_compressed_length(&self, input_len: usize) -> usize {
        max_compressed_length(input_len)
    }

    /// Compresses into a new, exactly-sized vector.
    fn compress_to_vec(&mut self, src: &[u8]) -> Result<Vec<u8>, Lz4Error> {
        let mut dst = vec![0u8; self.max_compressed_length(src.len())];
        let written = self.compress(src, &mut dst)?;
        dst.truncate(written);
        Ok(dst)
    }
}

impl BlockCompressor for FastEncoder {
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
        FastEncoder::compress(self, src, dst)
    }
}

impl BlockCompressor for HcEncoder {
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
        HcEncoder::compress(self, src, dst)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compressor flavours
// ─────────────────────────────────────────────────────────────────────────────

/// Block compressor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compressor {
    Fast { acceleration: u32 },
    Hc { level: i32 },
}

impl Default for Compressor {
    fn default() -> Self {
        Compressor::fast()
    }
}

impl Compressor {
    pub fn fast() -> Self {
        Compressor::Fast {
            acceleration: ACCELERATION_DEFAULT,
        }
    }

    /// HC compressor; `level` is normalised to `1..=17`.
    pub fn hc(level: i32) -> Self {
        Compressor::Hc {
            level: normalize_level(level),
        }
    }

    /// Allocates the scratch state for this flavour.
    pub fn encoder(&self) -> Encoder {
        match *self {
            Compressor::Fast { acceleration } => {
                Encoder::Fast(FastEncoder::with_acceleration(acceleration))
            }
            Compressor::Hc { level } => Encoder::Hc(HcEncoder::new(level)),
        }
    }
}

impl fmt::Display for Compressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compressor::Fast { acceleration: 1 } => write!(f, "fast"),
            Compressor::Fast { acceleration } => write!(f, "fast(acceleration {acceleration})"),
            Compressor::Hc { level } => write!(f, "hc(level {level})"),
        }
    }
}

/// A compressor together with its scratch tables.
pub enum Encoder {
    Fast(FastEncoder),
    Hc(HcEncoder),
}

impl Encoder {
    pub fn kind(&self) -> Compressor {
        match self {
            Encoder::Fast(e) => Compressor::Fast {
                acceleration: e.acceleration(),
            },
            Encoder::Hc(e) => Compressor::Hc { level: e.level() },
        }
    }
}

impl BlockCompressor for Encoder {
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Lz4Error> {
        match self {
            Encoder::Fast(e) => e.compress(src, dst),
            Encoder::Hc(e) => e.compress(src, dst),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor flavours
// ─────────────────────────────────────────────────────────────────────────────

/// Block decoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decompressor {
    /// Trusts the decoded length; reads only as much source as needed.
    Trusting,
    /// Trusts the compressed length; bounds the output by the destination.
    Defensive,
}

/// Anything that decodes one LZ4 block whose two lengths are known.
pub trait BlockDecompressor {
    /// Decodes `src` into all of `dst`, failing unless the block uses exactly
    /// `src.len()` input bytes and produces exactly `dst.len()` output bytes.
    fn decompress_exact(&self, src: &[u8], dst: &mut [u8]) -> Result<(), Lz4Error>;
}

impl BlockDecompressor for Decompressor {
    fn decompress_exact(&self, src: &[u8], dst: &mut [u8]) -> Result<(), Lz4Error> {
        match self {
            Decompressor::Trusting => {
                let consumed = decompress_fast(src, dst)?;
                if consumed != src.len() {
                    return Err(Lz4Error::CorruptInput { offset: consumed });
                }
            }
            Decompressor::Defensive => {
                let produced = decompress(src, dst)?;
                if produced != dst.len() {
                    return Err(Lz4Error::CorruptInput { offset: src.len() });
                }
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend selection
// ─────────────────────────────────────────────────────────────────────────────

/// Execution engine behind the codec entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Safe Rust implementation in this crate.
    Pure,
}

impl Backend {
    /// Picks the fastest backend available in this process.  The result is
    /// computed once and cached.
    pub fn probe() -> Backend {
        static SELECTED: OnceLock<Backend> = OnceLock::new();
        *SELECTED.get_or_init(|| {
            let backend = Backend::Pure;
            debug!(backend = backend.name(), "codec backend selected");
            backend
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Pure => "pure-rust",
        }
    }
}

/// Source of compressors and decompressors for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factory {
    backend: Backend,
}

impl Factory {
    /// Factory for the backend picked by [`Backend::probe`].
    pub fn fastest() -> Self {
        Factory {
            backend: Backend::probe(),
        }
    }

    /// Factory for the pure Rust backend, bypassing the probe.
    pub fn pure() -> Self {
        Factory {
            backend: Backend::Pure,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn fast_compressor(&self) -> Compressor {
        Compressor::fast()
    }

    pub fn high_compressor(&self, level: i32) -> Compressor {
        Compressor::hc(level)
    }

    pub fn trusting_decompressor(&self) -> Decompressor {
        Decompressor::Trusting
    }

    pub fn defensive_decompressor(&self) -> Decompressor {
        Decompressor::Defensive
    }
}
