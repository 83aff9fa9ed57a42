//! Frame layout: `STEG` magic, big-endian LEN, ciphertext, big-endian CRC32.
//!
//! ```text
//! offset 0..3        : 'S','T','E','G'
//! offset 4..7        : LEN (u32 BE, ciphertext length)
//! offset 8..8+LEN-1  : ciphertext
//! offset 8+LEN..+3   : CRC32 (u32 BE) over bytes [0, 8+LEN)
//! ```

use crate::config::{MAX_CIPHERTEXT_LEN, MIN_CIPHERTEXT_LEN};
use crate::crc;
use crate::error::StegoError;

pub const MAGIC: [u8; 4] = *b"STEG";

/// Build a complete frame around a ciphertext payload.
pub fn build_frame(ciphertext: &[u8]) -> Result<Vec<u8>, StegoError> {
    let len = ciphertext.len();
    if len == 0 || len as u64 > MAX_CIPHERTEXT_LEN as u64 {
        return Err(StegoError::InvalidLength(len as u32));
    }

    let mut frame = Vec::with_capacity(8 + len + 4);
    frame.extend_from_slice(&MAGIC);
    frame.extend_from_slice(&(len as u32).to_be_bytes());
    frame.extend_from_slice(ciphertext);

    let checksum = crc::crc32(&frame);
    frame.extend_from_slice(&checksum.to_be_bytes());

    Ok(frame)
}

/// Parse a complete frame, verifying magic and CRC, returning the
/// ciphertext payload.
pub fn parse_frame(bytes: &[u8]) -> Result<Vec<u8>, StegoError> {
    if bytes.len() < 12 {
        return Err(StegoError::InputError(format!(
            "frame too short: {} bytes",
            bytes.len()
        )));
    }

    if bytes[0..4] != MAGIC {
        return Err(StegoError::InternalInconsistency(
            "magic mismatch while parsing frame".into(),
        ));
    }

    let len = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if len < MIN_CIPHERTEXT_LEN || len > MAX_CIPHERTEXT_LEN {
        return Err(StegoError::InvalidLength(len));
    }

    let body_end = 8 + len as usize;
    if bytes.len() < body_end + 4 {
        return Err(StegoError::InputError(format!(
            "frame declares LEN={len} but only has {} trailing bytes",
            bytes.len() - 8
        )));
    }

    let stored_crc = u32::from_be_bytes([
        bytes[body_end],
        bytes[body_end + 1],
        bytes[body_end + 2],
        bytes[body_end + 3],
    ]);
    let computed_crc = crc::crc32(&bytes[0..body_end]);
    if stored_crc != computed_crc {
        return Err(StegoError::CrcMismatch {
            expected: stored_crc,
            computed: computed_crc,
        });
    }

    Ok(bytes[8..body_end].to_vec())
}
