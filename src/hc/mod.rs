//! High-compression (HC) block compressor.
//!
//! Produces ordinary LZ4 blocks, decodable by [`crate::block::decompress`],
//! at a better ratio than the fast compressor by searching a hash chain and
//! parsing lazily.
//!
//! Submodules:
//! - [`types`]:       levels, table sizes, the [`types::Match`] record
//! - [`search`]:      the hash chain and its two match searches
//! - [`compress_hc`]: the lazy parser and public entry points

pub mod compress_hc;
pub mod search;
pub mod types;

pub use compress_hc::{compress_hc, compress_hc_into, compress_hc_to_vec, HcEncoder};
pub use types::{HC_CLEVEL_DEFAULT, HC_CLEVEL_MAX, HC_CLEVEL_MIN};
