// ---------------------------------------------------------------------------
// file_header – Configuration file header with magic bytes, version, checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "RPOP"
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = LZ4 compressed)
//   [12..20] Timestamp (Unix epoch, u64)
//   [20..24] Uncompressed payload size (u32)
//   [24..28] xxHash32 checksum of the stored payload (everything after the header)

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

pub const MAGIC: [u8; 4] = *b"RPOP";

pub const HEADER_SIZE: usize = 28;

/// Layout version of the header itself, independent of the payload schema.
pub const HEADER_FORMAT_VERSION: u32 = 1;

pub const FLAG_COMPRESSED: u32 = 1;

const XXHASH_SEED: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Prefix `data` with a header, compressing it first when `compress` is set.
pub fn wrap_with_header(data: &[u8], compress: bool) -> Vec<u8> {
    let (flags, stored) = if compress {
        (FLAG_COMPRESSED, lz4_flex::compress_prepend_size(data))
    } else {
        (0, data.to_vec())
    };
    let header = FileHeader {
        format_version: HEADER_FORMAT_VERSION,
        flags,
        timestamp: now_secs(),
        uncompressed_size: data.len() as u32,
        checksum: xxh32(&stored, XXHASH_SEED),
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + stored.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.flags.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.uncompressed_size.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());
    out.extend_from_slice(&stored);
    out
}

/// Validate the header and return it with the (decompressed) payload.
///
/// # Errors
///
/// - `Corrupted` for wrong magic, a truncated header, a checksum mismatch or
///   a payload whose size disagrees with the header
/// - `VersionMismatch` for a header written by a newer build
/// - `Decode` if LZ4 decompression fails
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, Vec<u8>), SaveError> {
    if bytes.len() < MAGIC.len() || bytes[..4] != MAGIC {
        return Err(SaveError::Corrupted(
            "missing RPOP magic bytes, not a configuration file".to_string(),
        ));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Corrupted(format!(
            "file too short ({} bytes, need at least {} for header)",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags: read_u32(bytes, 8),
        timestamp: u64::from_le_bytes([
            bytes[12], bytes[13], bytes[14], bytes[15], bytes[16], bytes[17], bytes[18], bytes[19],
        ]),
        uncompressed_size: read_u32(bytes, 20),
        checksum: read_u32(bytes, 24),
    };

    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let stored = &bytes[HEADER_SIZE..];
    let computed = xxh32(stored, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Corrupted(format!(
            "checksum mismatch (expected {:#010X}, got {:#010X})",
            header.checksum, computed
        )));
    }

    let payload = if header.is_compressed() {
        lz4_flex::decompress_size_prepended(stored)
            .map_err(|e| SaveError::Decode(format!("LZ4 decompression failed: {e}")))?
    } else {
        stored.to_vec()
    };
    if payload.len() != header.uncompressed_size as usize {
        return Err(SaveError::Corrupted(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            header.uncompressed_size
        )));
    }
    Ok((header, payload))
}
