//! Error taxonomy for the acoustic link, per the fault model: every failure
//! is fatal for the current invocation, none are retried internally.

use thiserror::Error;

/// All ways an encode or decode attempt can fail.
#[derive(Debug, Error)]
pub enum StegoError {
    #[error("input error: {0}")]
    InputError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("sync not found within first {search_max} samples (best score {best_score}/{pre_bits})")]
    SyncNotFound {
        search_max: usize,
        best_score: usize,
        pre_bits: usize,
    },

    #[error("magic not found near sync (searched +/-{window} samples around offset {base})")]
    MagicNotFound { base: i64, window: usize },

    #[error("invalid ciphertext length {0} (must be 1..=2000000)")]
    InvalidLength(u32),

    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch { expected: u32, computed: u32 },

    #[error("decryption failed: {0}")]
    DecryptFailed(String),

    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}
