//! Frame header encoding and parsing, byte-order helpers, header checksum and
//! the worst-case frame size.
//!
//! Header layout:
//!
//! ```text
//! magic (4, LE) | FLG (1) | BD (1) | content size (8, LE, optional) | HC (1)
//! ```
//!
//! `HC` is the second byte of the XXH32 (seed 0) of the descriptor, i.e. of
//! everything between the magic and `HC` itself.

use super::types::{
    BlockChecksum, BlockSizeId, ContentChecksum, CorruptionCause, FrameError, FrameInfo,
    FrameType, Preferences, BD_BLOCK_SIZE_SHIFT, BD_RESERVED, BF_SIZE, BH_SIZE, CHECKSUM_SIZE,
    FLG_BLOCK_CHECKSUM, FLG_BLOCK_INDEPENDENCE, FLG_CONTENT_CHECKSUM, FLG_CONTENT_SIZE,
    FLG_RESERVED, FLG_VERSION, FLG_VERSION_SHIFT, LZ4F_MAGIC, LZ4F_SKIPPABLE_MAGIC,
    LZ4F_SKIPPABLE_MASK, MAGIC_SIZE, MAX_FH_SIZE, MIN_FH_SIZE,
};
use crate::block::types::max_compressed_length;
use crate::xxhash::xxh32_oneshot;

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Reads a little-endian `u32` at `offset`.  The caller checks the length.
#[inline]
pub fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

#[inline]
pub fn read_le64(src: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&src[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

#[inline]
pub fn write_le32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn write_le64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Returns `true` for the sixteen skippable-frame magic numbers.
#[inline]
pub fn is_skippable_magic(magic: u32) -> bool {
    magic & LZ4F_SKIPPABLE_MASK == LZ4F_SKIPPABLE_MAGIC
}

// ─────────────────────────────────────────────────────────────────────────────
// Header checksum
// ─────────────────────────────────────────────────────────────────────────────

/// Single-byte header checksum: `(XXH32(descriptor, 0) >> 8) & 0xFF`.
#[inline]
pub fn header_checksum(descriptor: &[u8]) -> u8 {
    ((xxh32_oneshot(descriptor, 0) >> 8) & 0xFF) as u8
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Appends the header for `info` to `out` and returns its length.
pub fn write_header(info: &FrameInfo, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    write_le32(out, LZ4F_MAGIC);

    let mut flg = (FLG_VERSION << FLG_VERSION_SHIFT) | FLG_BLOCK_INDEPENDENCE;
    if info.block_checksum == BlockChecksum::Enabled {
        flg |= FLG_BLOCK_CHECKSUM;
    }
    if info.content_size.is_some() {
        flg |= FLG_CONTENT_SIZE;
    }
    if info.content_checksum == ContentChecksum::Enabled {
        flg |= FLG_CONTENT_CHECKSUM;
    }
    out.push(flg);
    out.push((info.block_size_id as u8) << BD_BLOCK_SIZE_SHIFT);
    if let Some(size) = info.content_size {
        write_le64(out, size);
    }

    let hc = header_checksum(&out[start + MAGIC_SIZE..]);
    out.push(hc);
    out.len() - start
}

/// Appends a skippable frame carrying `payload`.  `nibble` selects one of the
/// sixteen skippable magic numbers.
pub fn write_skippable_frame(
    nibble: u8,
    payload: &[u8],
    out: &mut Vec<u8>,
) -> Result<(), FrameError> {
    if nibble > 0x0F {
        return Err(FrameError::InvalidArgument("skippable magic nibble above 0x0F"));
    }
    let len = u32::try_from(payload.len())
        .map_err(|_| FrameError::InvalidArgument("skippable payload exceeds 4 GiB"))?;
    write_le32(out, LZ4F_SKIPPABLE_MAGIC | nibble as u32);
    write_le32(out, len);
    out.extend_from_slice(payload);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Fails with `Truncated` unless `src` has `needed` bytes from `offset`.
#[inline]
pub(crate) fn require(src: &[u8], offset: usize, needed: usize) -> Result<(), FrameError> {
    if src.len().saturating_sub(offset) < needed {
        return Err(FrameError::corrupted(
            offset,
            CorruptionCause::Truncated {
                needed: needed - src.len().saturating_sub(offset),
            },
        ));
    }
    Ok(())
}

/// Parses the frame header at `src[offset..]`.
///
/// Returns the header and its length in bytes.  For a skippable frame the
/// length covers the magic and size words only, and `content_size` holds the
/// payload size.
pub fn parse_header(src: &[u8], offset: usize) -> Result<(FrameInfo, usize), FrameError> {
    require(src, offset, MAGIC_SIZE)?;
    let magic = read_le32(src, offset);

    if is_skippable_magic(magic) {
        require(src, offset + MAGIC_SIZE, 4)?;
        let size = read_le32(src, offset + MAGIC_SIZE);
        let info = FrameInfo {
            frame_type: FrameType::Skippable,
            content_size: Some(size as u64),
            ..FrameInfo::default()
        };
        return Ok((info, MAGIC_SIZE + 4));
    }
    if magic != LZ4F_MAGIC {
        return Err(FrameError::corrupted(offset, CorruptionCause::BadMagic(magic)));
    }

    let desc = offset + MAGIC_SIZE;
    require(src, desc, 2)?;
    let flg = src[desc];
    let bd = src[desc + 1];

    let version = flg >> FLG_VERSION_SHIFT;
    if version != FLG_VERSION {
        return Err(FrameError::corrupted(
            desc,
            CorruptionCause::UnsupportedVersion(version),
        ));
    }
    if flg & FLG_RESERVED != 0 || bd & BD_RESERVED != 0 {
        return Err(FrameError::corrupted(desc, CorruptionCause::ReservedBits));
    }
    if flg & FLG_BLOCK_INDEPENDENCE == 0 {
        return Err(FrameError::corrupted(desc, CorruptionCause::DependentBlocks));
    }
    let id = bd >> BD_BLOCK_SIZE_SHIFT;
    let block_size_id = BlockSizeId::from_id(id)
        .ok_or_else(|| FrameError::corrupted(desc + 1, CorruptionCause::InvalidBlockSize(id)))?;

    let has_content_size = flg & FLG_CONTENT_SIZE != 0;
    let desc_len = if has_content_size { 2 + 8 } else { 2 };
    require(src, desc, desc_len + 1)?;

    let content_size = has_content_size.then(|| read_le64(src, desc + 2));
    let stored = src[desc + desc_len];
    let computed = header_checksum(&src[desc..desc + desc_len]);
    if stored != computed {
        return Err(FrameError::corrupted(
            desc + desc_len,
            CorruptionCause::HeaderChecksum { stored, computed },
        ));
    }

    let info = FrameInfo {
        block_size_id,
        block_checksum: if flg & FLG_BLOCK_CHECKSUM != 0 {
            BlockChecksum::Enabled
        } else {
            BlockChecksum::Disabled
        },
        content_checksum: if flg & FLG_CONTENT_CHECKSUM != 0 {
            ContentChecksum::Enabled
        } else {
            ContentChecksum::Disabled
        },
        content_size,
        frame_type: FrameType::Frame,
    };
    Ok((info, MAGIC_SIZE + desc_len + 1))
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case size of a whole frame holding `src_size` bytes.
pub fn compress_frame_bound(src_size: usize, prefs: &Preferences) -> usize {
    let info = &prefs.frame_info;
    let block_size = info.block_size_id.block_size();
    let full_blocks = src_size / block_size;
    let last = src_size % block_size;
    let nb_blocks = full_blocks + usize::from(last > 0);
    let block_trailer = if info.block_checksum == BlockChecksum::Enabled {
        BF_SIZE
    } else {
        0
    };
    // A block never stores more than its raw size.
    let payload = src_size + nb_blocks * (BH_SIZE + block_trailer);
    let header = if info.content_size.is_some() {
        MAX_FH_SIZE
    } else {
        MIN_FH_SIZE
    };
    let trailer = BH_SIZE
        + if info.content_checksum == ContentChecksum::Enabled {
            CHECKSUM_SIZE
        } else {
            0
        };
    header + payload + trailer
}

/// Size of the scratch buffer needed to compress one block.
pub fn block_scratch_size(block_size_id: BlockSizeId) -> usize {
    max_compressed_length(block_size_id.block_size())
}
