//! Wire-visible constants for the acoustic link.
//!
//! Every implementation that wants to interoperate with a counterpart must
//! match these bit-for-bit: they are not tuning knobs, they are the protocol.

use crate::error::StegoError;

/// Mark-frequency tone for bit 0 (Hz).
pub const F0: f64 = 1200.0;
/// Mark-frequency tone for bit 1 (Hz).
pub const F1: f64 = 2200.0;

/// Duration of a single transmitted symbol, in seconds.
pub const BIT_DURATION: f64 = 0.015;

/// Length of the acquisition preamble, in seconds.
pub const PREAMBLE_SECONDS: f64 = 1.5;

/// Each data bit is transmitted this many times (odd, so majority vote
/// cannot tie).
pub const REP: usize = 3;

/// Sample rate the sender writes at. The receiver accepts any rate present
/// in the file and recomputes `spb` from it.
pub const SAMPLE_RATE_TX: u32 = 44_100;

/// Peak modulator amplitude before clamping.
pub const AMPLITUDE: f32 = 0.87;

/// Weight of the BFSK tone when mixed into a cover signal.
pub const STEGO_STRENGTH: f32 = 0.2;

/// Weight of the cover signal itself when mixing.
pub const COVER_GAIN: f32 = 0.3;

/// Minimum samples-per-bit below which timing resolution is too coarse to
/// carry a symbol reliably.
const MIN_SPB: usize = 40;

/// Smallest byte count the LEN field may declare.
pub const MIN_CIPHERTEXT_LEN: u32 = 1;
/// Largest byte count the LEN field may declare.
pub const MAX_CIPHERTEXT_LEN: u32 = 2_000_000;

/// Per-sample-rate derived parameters. Computed once and threaded through
/// the modulator, detector and acquisition stages instead of recomputing
/// `round()` calls inline at every call site.
#[derive(Debug, Clone, Copy)]
pub struct LinkParams {
    pub sample_rate: u32,
    /// Samples per bit: `round(sample_rate * BIT_DURATION)`.
    pub spb: usize,
    /// Number of preamble symbols: `max(32, round(PREAMBLE_SECONDS / BIT_DURATION))`.
    pub pre_bits: usize,
}

impl LinkParams {
    /// Derive timing parameters for a given sample rate.
    ///
    /// # Errors
    /// Returns [`StegoError::ConfigError`] if the resulting `spb` is below
    /// the minimum needed to carry a symbol (`spb < 40`).
    pub fn new(sample_rate: u32) -> Result<Self, StegoError> {
        let spb = (sample_rate as f64 * BIT_DURATION).round() as usize;
        if spb < MIN_SPB {
            return Err(StegoError::ConfigError(format!(
                "sample rate {sample_rate} Hz yields spb={spb}, below minimum {MIN_SPB}"
            )));
        }

        let pre_bits_raw = (PREAMBLE_SECONDS / BIT_DURATION).round() as usize;
        let pre_bits = pre_bits_raw.max(32);

        Ok(LinkParams {
            sample_rate,
            spb,
            pre_bits,
        })
    }
}
