//! Parsing for the optional `--key-hex`/`--iv-hex` CLI overrides. The
//! documented default is the fixed demo key/IV in [`crate::DEFAULT_KEY`] /
//! [`crate::DEFAULT_IV`]; these helpers only exist so the binaries (and
//! tests) can exercise the link with different key material without
//! touching the wire format.

use crate::error::StegoError;

fn decode_hex(hex: &str, expected_len: usize, what: &str) -> Result<Vec<u8>, StegoError> {
    let hex = hex.trim();
    if hex.len() != expected_len * 2 {
        return Err(StegoError::InputError(format!(
            "{what} must be {expected_len} bytes ({} hex chars), got {}",
            expected_len * 2,
            hex.len()
        )));
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| StegoError::InputError(format!("invalid hex in {what}: {e}")))
        })
        .collect()
}

/// Parse a 64-character hex string into a 32-byte AES-256 key.
pub fn parse_key_hex(hex: &str) -> Result<[u8; 32], StegoError> {
    let bytes = decode_hex(hex, 32, "--key-hex")?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Parse a 32-character hex string into a 16-byte CTR IV.
pub fn parse_iv_hex(hex: &str) -> Result<[u8; 16], StegoError> {
    let bytes = decode_hex(hex, 16, "--iv-hex")?;
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&bytes);
    Ok(iv)
}
