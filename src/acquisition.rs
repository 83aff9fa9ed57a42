//! Two-stage acquisition: a coarse preamble correlation search for sub-bit
//! timing, followed by a magic-anchored refinement that locks the bit grid
//! and resolves polarity.
//!
//! Splitting the search this way amortises cost: stage 1 is cheap per-bit
//! hamming-style scoring over a wide offset range; stage 2 is a handful of
//! full 32-bit decodes over a narrow window anchored on the real frame
//! structure, which is what disambiguates polarity (an alternating preamble
//! looks alternating whether inverted or not, only its phase shifts).

use log::warn;

use crate::config::{LinkParams, REP};
use crate::detector::{decode_byte, detect_bit};
use crate::error::StegoError;
use crate::frame::MAGIC;

const EARLY_EXIT_RATIO: f64 = 0.93;
const COARSE_SEARCH_SECONDS: f64 = 3.0;

/// Result of the coarse preamble search.
#[derive(Debug, Clone, Copy)]
pub struct CoarseResult {
    pub offset: usize,
    pub invert: bool,
    pub score: usize,
}

/// Result of magic-anchored refinement.
#[derive(Debug, Clone, Copy)]
pub struct RefineResult {
    pub pos: usize,
    pub invert: bool,
}

/// Stage 1: find a coarse sample offset and polarity that best matches the
/// alternating preamble pattern.
///
/// # Errors
/// Returns [`StegoError::SyncNotFound`] if the buffer is too short to test
/// any offset.
pub fn coarse_search(samples: &[f32], params: &LinkParams) -> Result<CoarseResult, StegoError> {
    let fs = params.sample_rate as f64;
    let search_max = ((COARSE_SEARCH_SECONDS * fs).round() as usize).min(samples.len());
    let step = (params.spb / 6).max(1);

    let mut best: Option<CoarseResult> = None;
    let mut tried_any = false;

    let mut off = 0usize;
    while off < search_max {
        tried_any = true;

        for invert in [false, true] {
            let score = score_offset(samples, off, params, fs, invert);
            let improves = best.map(|b| score > b.score).unwrap_or(true);
            if improves {
                best = Some(CoarseResult { offset: off, invert, score });
            }
        }

        if let Some(b) = best {
            if b.score as f64 > EARLY_EXIT_RATIO * params.pre_bits as f64 {
                break;
            }
        }

        off += step;
    }

    if !tried_any {
        return Err(StegoError::SyncNotFound {
            search_max,
            best_score: 0,
            pre_bits: params.pre_bits,
        });
    }

    // Unreachable in practice: tried_any guarantees at least one candidate
    // was recorded. Kept as a typed fallback rather than an unwrap.
    match best {
        Some(result) => {
            if (result.score as f64) <= EARLY_EXIT_RATIO * params.pre_bits as f64 {
                warn!(
                    "coarse search ran to completion without hitting the early-exit \
                     threshold (best score {}/{}, offset={}, invert={})",
                    result.score, params.pre_bits, result.offset, result.invert
                );
            }
            Ok(result)
        }
        None => Err(StegoError::SyncNotFound {
            search_max,
            best_score: 0,
            pre_bits: params.pre_bits,
        }),
    }
}

/// Count preamble positions where the detector agrees with the expected
/// alternating bit `b % 2`, stopping early if a window runs past the end
/// of the buffer.
fn score_offset(samples: &[f32], off: usize, params: &LinkParams, fs: f64, invert: bool) -> usize {
    let mut score = 0usize;
    for b in 0..params.pre_bits {
        let p = off + b * params.spb;
        match detect_bit(samples, p, params.spb, fs, invert) {
            Some(bit) if bit == (b % 2) as u8 => score += 1,
            Some(_) => {}
            None => break,
        }
    }
    score
}

/// Stage 2: search a `+/- spb` window around the estimated frame start for
/// an exact `STEG` magic match, trying both polarities.
///
/// # Errors
/// Returns [`StegoError::MagicNotFound`] if no `(delta, invert)` pair in
/// the window decodes to the magic bytes.
pub fn refine(samples: &[f32], params: &LinkParams, coarse: &CoarseResult) -> Result<RefineResult, StegoError> {
    let base = coarse.offset as i64 + (params.pre_bits * params.spb) as i64;
    let window = params.spb as i64;
    let step = ((params.spb / 24).max(1)) as i64;
    let bytes_needed_samples = 4 * 8 * REP * params.spb;

    let mut delta = -window;
    while delta <= window {
        let p = base + delta;
        if p >= 0 {
            let p = p as usize;
            if p + bytes_needed_samples <= samples.len() {
                for invert in [false, true] {
                    if let Some(magic) = decode_magic(samples, p, params, invert) {
                        if magic == MAGIC {
                            return Ok(RefineResult { pos: p, invert });
                        }
                    }
                }
            }
        }
        delta += step;
    }

    Err(StegoError::MagicNotFound {
        base,
        window: window as usize,
    })
}

/// Decode 4 bytes starting at `p` via the full repetition+I/Q path.
fn decode_magic(samples: &[f32], p: usize, params: &LinkParams, invert: bool) -> Option<[u8; 4]> {
    let mut cursor = p;
    let mut bytes = [0u8; 4];
    for slot in bytes.iter_mut() {
        let (byte, next) = decode_byte(samples, cursor, params, invert)?;
        *slot = byte;
        cursor = next;
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::build_frame;
    use crate::modulator::modulate;

    fn make_signal(message: &[u8]) -> (Vec<f32>, LinkParams) {
        let params = LinkParams::new(44_100).unwrap();
        let frame = build_frame(message).unwrap();
        let samples = modulate(&frame, &params, None);
        (samples, params)
    }

    #[test]
    fn coarse_search_finds_offset_zero_clean_signal() {
        let (samples, params) = make_signal(b"hello cipher bytes");
        let result = coarse_search(&samples, &params).unwrap();
        assert_eq!(result.offset, 0);
        assert!(!result.invert);
        assert!(result.score as f64 > 0.9 * params.pre_bits as f64);
    }

    #[test]
    fn coarse_search_handles_leading_silence() {
        let (samples, params) = make_signal(b"hi");
        let mut padded = vec![0.0f32; params.spb * 10];
        padded.extend_from_slice(&samples);
        let result = coarse_search(&padded, &params).unwrap();
        // offset should land close to the true preamble start
        assert!((result.offset as i64 - (params.spb * 10) as i64).abs() < params.spb as i64);
    }

    #[test]
    fn coarse_search_detects_inversion() {
        let (samples, params) = make_signal(b"hi");
        let inverted: Vec<f32> = samples.iter().map(|s| -s).collect();
        let result = coarse_search(&inverted, &params).unwrap();
        assert!(result.invert);
    }

    #[test]
    fn coarse_search_fails_on_empty_buffer() {
        let params = LinkParams::new(44_100).unwrap();
        let empty: Vec<f32> = Vec::new();
        assert!(matches!(
            coarse_search(&empty, &params),
            Err(StegoError::SyncNotFound { .. })
        ));
    }

    #[test]
    fn refine_locates_magic_on_clean_signal() {
        let (samples, params) = make_signal(b"hi");
        let coarse = coarse_search(&samples, &params).unwrap();
        let refined = refine(&samples, &params, &coarse).unwrap();
        assert_eq!(refined.pos, params.pre_bits * params.spb);
        assert!(!refined.invert);
    }

    #[test]
    fn refine_fails_on_silence() {
        let params = LinkParams::new(44_100).unwrap();
        let silence = vec![0.0f32; params.spb * 50];
        let coarse = CoarseResult { offset: 0, invert: false, score: 0 };
        assert!(matches!(
            refine(&silence, &params, &coarse),
            Err(StegoError::MagicNotFound { .. })
        ));
    }
}
