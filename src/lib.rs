//! Acoustic link layer for transmitting short encrypted text payloads as a
//! 16-bit mono PCM waveform and recovering them from a recording.
//!
//! The binaries (`sender`, `receiver`) are thin CLI wrappers around
//! [`encode_message`] / [`decode_message`]; everything interesting —
//! framing, modulation, front-end conditioning and acquisition — lives
//! here as a library so it can be unit- and property-tested directly.

pub mod acquisition;
pub mod biquad;
pub mod codec;
pub mod config;
pub mod crc;
pub mod crypto;
pub mod detector;
pub mod error;
pub mod frame;
pub mod frontend;
pub mod keymaterial;
pub mod modulator;
pub mod wav;

pub use codec::{decode_message, encode_message, DecodeDiagnostics};
pub use error::StegoError;

/// Demo-only fixed key. Production use requires per-message random IVs
/// conveyed out of band; that negotiation is explicitly out of scope here.
pub const DEFAULT_KEY: [u8; 32] = *b"01234567890123456789012345678901";
/// Demo-only fixed IV, paired with [`DEFAULT_KEY`].
pub const DEFAULT_IV: [u8; 16] = *b"0123456789012345";
