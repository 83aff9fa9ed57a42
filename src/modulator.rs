//! BFSK modulator: preamble plus repetition-coded frame bits, each symbol a
//! Hann-windowed tone at `F0` or `F1`.

use crate::config::{LinkParams, AMPLITUDE, COVER_GAIN, F0, F1, REP, STEGO_STRENGTH};

/// Modulate `frame` into a PCM waveform: preamble symbols (no repetition),
/// then `REP` copies of each frame bit, MSB first within each byte.
///
/// If `cover` is given, the tone is mixed under it instead of played alone,
/// wrapping around the cover buffer if it is shorter than the message.
pub fn modulate(frame: &[u8], params: &LinkParams, cover: Option<&[f32]>) -> Vec<f32> {
    let total_symbols = params.pre_bits + frame.len() * 8 * REP;
    let mut out = Vec::with_capacity(total_symbols * params.spb);

    let mut symbol_index = 0usize;
    for b in 0..params.pre_bits {
        let bit = (b % 2) as u8;
        emit_symbol(&mut out, bit, symbol_index, params, cover);
        symbol_index += 1;
    }

    for &byte in frame {
        for bit_pos in (0..8).rev() {
            let bit = (byte >> bit_pos) & 1;
            for _ in 0..REP {
                emit_symbol(&mut out, bit, symbol_index, params, cover);
                symbol_index += 1;
            }
        }
    }

    out
}

/// Append one Hann-windowed BFSK symbol to `out`.
fn emit_symbol(out: &mut Vec<f32>, bit: u8, symbol_index: usize, params: &LinkParams, cover: Option<&[f32]>) {
    let freq = if bit == 1 { F1 } else { F0 };
    let si = symbol_index * params.spb;
    let spb = params.spb;
    let fs = params.sample_rate as f64;

    for k in 0..spb {
        let window = if spb > 1 {
            0.5 - 0.5 * (2.0 * std::f64::consts::PI * k as f64 / (spb - 1) as f64).cos()
        } else {
            1.0
        };
        let phase = 2.0 * std::f64::consts::PI * freq * (si + k) as f64 / fs;
        let tone = (AMPLITUDE as f64) * window * phase.sin();

        let sample = match cover {
            Some(cov) if !cov.is_empty() => {
                let cover_sample = cov[(si + k) % cov.len()] as f64;
                COVER_GAIN as f64 * cover_sample + STEGO_STRENGTH as f64 * tone
            }
            _ => tone,
        };

        out.push(sample.clamp(-1.0, 1.0) as f32);
    }
}
