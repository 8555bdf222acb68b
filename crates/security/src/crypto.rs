//! AES-256-GCM tokens
//!
//! Token layout: `nonce (12 bytes) || ciphertext+tag`. A fresh random nonce is
//! drawn per call, so encrypting the same plaintext twice yields different
//! tokens.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{Result, SecurityError};

/// Key size in bytes
pub const KEY_LEN: usize = 32;
/// Nonce size in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// Fresh random 256-bit key
pub fn generate_key() -> Bytes {
    let key = Aes256Gcm::generate_key(OsRng);
    Bytes::copy_from_slice(key.as_slice())
}

/// Encrypt `data` under `key`
pub fn encrypt(data: &[u8], key: &[u8]) -> Result<Bytes> {
    let cipher = cipher(key)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, data)
        .map_err(|_| SecurityError::Encryption)?;

    let mut token = BytesMut::with_capacity(NONCE_LEN + sealed.len());
    token.put_slice(nonce.as_slice());
    token.put_slice(&sealed);
    debug!(plaintext_len = data.len(), token_len = token.len(), "encrypted");
    Ok(token.freeze())
}

/// Decrypt a token produced by [`encrypt`]
pub fn decrypt(token: &[u8], key: &[u8]) -> Result<Bytes> {
    let cipher = cipher(key)?;
    if token.len() < NONCE_LEN {
        return Err(SecurityError::decryption(format!(
            "token too short ({} bytes)",
            token.len()
        )));
    }
    let (nonce, sealed) = token.split_at(NONCE_LEN);
    let plain = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| SecurityError::decryption("authentication failed"))?;
    Ok(Bytes::from(plain))
}

fn cipher(key: &[u8]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key).map_err(|_| SecurityError::InvalidKey {
        expected: KEY_LEN,
        actual: key.len(),
    })
}
