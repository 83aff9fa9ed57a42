//! Receiver front-end conditioning: DC removal, RMS normalisation, then a
//! band-pass (high-pass followed by low-pass) applied to the whole buffer.
//!
//! Idempotence is not required or guaranteed; running this twice on the
//! same buffer is harmless but unspecified.

use crate::biquad::Biquad;

const HIGH_PASS_HZ: f64 = 700.0;
const LOW_PASS_HZ: f64 = 2600.0;
const BUTTERWORTH_Q: f64 = 0.707;
const TARGET_RMS: f32 = 0.25;
const RMS_FLOOR: f32 = 1e-6;

/// Run the full front-end chain over `samples` in place.
pub fn condition(samples: &mut [f32], sample_rate: u32) {
    remove_dc(samples);
    normalize_rms(samples);
    band_pass(samples, sample_rate as f64);
}

/// Subtract the arithmetic mean from every sample.
fn remove_dc(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }
    let mean = samples.iter().copied().sum::<f32>() / samples.len() as f32;
    for s in samples.iter_mut() {
        *s -= mean;
    }
}

/// Scale the buffer so its RMS is `TARGET_RMS`, unless it is already too
/// quiet to measure reliably.
fn normalize_rms(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }
    let mean_sq = samples.iter().map(|&s| s * s).sum::<f32>() / samples.len() as f32;
    let rms = mean_sq.sqrt();
    if rms < RMS_FLOOR {
        return;
    }
    let gain = TARGET_RMS / rms;
    for s in samples.iter_mut() {
        *s *= gain;
    }
}

/// High-pass at 700 Hz followed by low-pass at 2600 Hz, each a fresh
/// Butterworth biquad applied over the full buffer.
fn band_pass(samples: &mut [f32], fs: f64) {
    let mut hp = Biquad::high_pass(HIGH_PASS_HZ, fs, BUTTERWORTH_Q);
    hp.process_buffer(samples);

    let mut lp = Biquad::low_pass(LOW_PASS_HZ, fs, BUTTERWORTH_Q);
    lp.process_buffer(samples);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_removal_zeroes_mean() {
        let mut samples = vec![1.0f32, 1.0, 1.0, 1.0];
        remove_dc(&mut samples);
        let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 1e-6);
    }

    #[test]
    fn rms_normalize_hits_target() {
        let mut samples = vec![2.0f32; 1000];
        normalize_rms(&mut samples);
        let mean_sq = samples.iter().map(|&s| s * s).sum::<f32>() / samples.len() as f32;
        assert!((mean_sq.sqrt() - TARGET_RMS).abs() < 1e-4);
    }

    #[test]
    fn rms_normalize_skips_near_silence() {
        let mut samples = vec![0.0f32; 100];
        normalize_rms(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn condition_does_not_panic_on_empty() {
        let mut samples: Vec<f32> = Vec::new();
        condition(&mut samples, 44_100);
    }
}
