//! AES-256-CTR, the external cipher primitive the frame payload rides on.
//! Wraps the RustCrypto `aes`/`ctr` stream cipher so the rest of the crate
//! only sees `encrypt`/`decrypt` over byte slices.

use aes::Aes256;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use crate::error::StegoError;

type Aes256Ctr = Ctr128BE<Aes256>;

/// Encrypt `plaintext` under `key`/`iv`.
pub fn encrypt(key: &[u8; 32], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    let mut buf = plaintext.to_vec();
    let mut cipher = Aes256Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    buf
}

/// Decrypt `ciphertext` under `key`/`iv`. CTR mode decryption is the same
/// keystream XOR as encryption; this returns a `Result` to keep the public
/// API symmetric with the rest of the error taxonomy even though the
/// RustCrypto primitives used here cannot themselves fail for fixed-size
/// key/IV inputs.
pub fn decrypt(key: &[u8; 32], iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut buf = ciphertext.to_vec();
    let mut cipher = Aes256Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}
