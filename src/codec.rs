//! Top-level TX/RX orchestration.
//!
//! TX: `plaintext -> AES-CTR -> frame bytes -> bit stream -> BFSK samples`.
//! RX: `samples -> front-end -> acquisition -> bit cursor -> majority vote
//! -> frame bytes -> CRC -> AES-CTR -> plaintext`.
//!
//! RX passes through the states `IDLE -> COARSE_SEARCHING -> REFINING ->
//! DECODING_HEADER -> DECODING_PAYLOAD -> VERIFYING -> DECRYPTING -> DONE`,
//! with a terminal `FAILED` transition (a `StegoError` variant) possible
//! from every non-terminal state.

use log::{debug, info};

use crate::acquisition::{coarse_search, refine};
use crate::config::LinkParams;
use crate::crypto;
use crate::detector::decode_byte;
use crate::error::StegoError;
use crate::frame::{build_frame, MAGIC};
use crate::frontend;
use crate::modulator::modulate;

/// Encrypt, frame and modulate `plaintext` into a PCM waveform at
/// `sample_rate`.
pub fn encode_message(
    plaintext: &[u8],
    key: &[u8; 32],
    iv: &[u8; 16],
    sample_rate: u32,
    cover: Option<&[f32]>,
) -> Result<Vec<f32>, StegoError> {
    let params = LinkParams::new(sample_rate)?;
    let ciphertext = crypto::encrypt(key, iv, plaintext);
    let frame = build_frame(&ciphertext)?;
    Ok(modulate(&frame, &params, cover))
}

/// Diagnostics surfaced alongside a successful decode, for post-mortem
/// logging.
#[derive(Debug, Clone, Copy)]
pub struct DecodeDiagnostics {
    pub coarse_offset: usize,
    pub coarse_score: usize,
    pub pre_bits: usize,
    pub invert: bool,
    pub frame_start: usize,
    pub ciphertext_len: u32,
}

/// Recover plaintext from a recorded PCM waveform.
pub fn decode_message(
    samples: &[f32],
    sample_rate: u32,
    key: &[u8; 32],
    iv: &[u8; 16],
) -> Result<(Vec<u8>, DecodeDiagnostics), StegoError> {
    let params = LinkParams::new(sample_rate)?;

    // Front-end conditioning runs once, before acquisition begins.
    let mut conditioned = samples.to_vec();
    frontend::condition(&mut conditioned, sample_rate);

    let coarse = coarse_search(&conditioned, &params)?;
    debug!(
        "coarse search: offset={} invert={} score={}/{}",
        coarse.offset, coarse.invert, coarse.score, params.pre_bits
    );

    let refined = refine(&conditioned, &params, &coarse)?;
    debug!(
        "refinement: frame_start={} invert={}",
        refined.pos, refined.invert
    );

    let mut cursor = refined.pos;

    // DECODING_HEADER: magic (re-verified) + LEN.
    let mut header = [0u8; 8];
    for slot in header.iter_mut() {
        let (byte, next) = decode_byte(&conditioned, cursor, &params, refined.invert).ok_or_else(|| {
            StegoError::InternalInconsistency("ran out of samples decoding header".into())
        })?;
        *slot = byte;
        cursor = next;
    }

    if header[0..4] != MAGIC {
        return Err(StegoError::InternalInconsistency(
            "magic mismatch after refinement locked the frame start".into(),
        ));
    }

    let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    if len == 0 || len > crate::config::MAX_CIPHERTEXT_LEN {
        return Err(StegoError::InvalidLength(len));
    }

    // DECODING_PAYLOAD: ciphertext bytes.
    let mut ciphertext = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let (byte, next) = decode_byte(&conditioned, cursor, &params, refined.invert).ok_or_else(|| {
            StegoError::InternalInconsistency("ran out of samples decoding payload".into())
        })?;
        ciphertext.push(byte);
        cursor = next;
    }

    // Stored CRC trailer.
    let mut crc_bytes = [0u8; 4];
    for slot in crc_bytes.iter_mut() {
        let (byte, next) = decode_byte(&conditioned, cursor, &params, refined.invert).ok_or_else(|| {
            StegoError::InternalInconsistency("ran out of samples decoding CRC".into())
        })?;
        *slot = byte;
        cursor = next;
    }
    let stored_crc = u32::from_be_bytes(crc_bytes);

    // VERIFYING.
    let mut frame_bytes = Vec::with_capacity(8 + ciphertext.len());
    frame_bytes.extend_from_slice(&header);
    frame_bytes.extend_from_slice(&ciphertext);
    let computed_crc = crate::crc::crc32(&frame_bytes);
    if computed_crc != stored_crc {
        return Err(StegoError::CrcMismatch {
            expected: stored_crc,
            computed: computed_crc,
        });
    }

    // DECRYPTING.
    let plaintext = crypto::decrypt(key, iv, &ciphertext)?;

    info!(
        "decoded {} plaintext bytes (ciphertext len {len}, invert={})",
        plaintext.len(),
        refined.invert
    );

    Ok((
        plaintext,
        DecodeDiagnostics {
            coarse_offset: coarse.offset,
            coarse_score: coarse.score,
            pre_bits: params.pre_bits,
            invert: refined.invert,
            frame_start: refined.pos,
            ciphertext_len: len,
        },
    ))
}
