//! AES-256-GCM sealing with HKDF-SHA256 key derivation.
//!
//! The sealed form is a single byte string, `salt || nonce || ciphertext+tag`,
//! so the on-disk document only needs one field per secret. The scope key
//! material is never used directly as a cipher key: every seal draws a fresh
//! salt and derives its own key, with the application entropy as HKDF info.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{CredentialError, Result};

const SALT_SIZE: usize = 16;
const NONCE_SIZE: usize = 12;
const KEY_SIZE: usize = 32;

/// Application-specific entropy mixed into every derived key.
pub const ENTROPY: &[u8] = b"AliDnsManager";

/// Shortest blob that can hold salt, nonce and a GCM tag.
const MIN_SEALED_LEN: usize = SALT_SIZE + NONCE_SIZE + 16;

fn derive_key(key_material: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), key_material);
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    hk.expand(ENTROPY, okm.as_mut_slice())
        .map_err(|e| CredentialError::EncryptionFailed(format!("key derivation: {e}")))?;
    Ok(okm)
}

/// Seal `plaintext` under `key_material`.
///
/// The same plaintext sealed twice gives different output.
pub fn seal(key_material: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(key_material, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| CredentialError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CredentialError::EncryptionFailed(e.to_string()))?;

    let mut sealed = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open a blob produced by [`seal`].
///
/// Fails on truncation, tampering, or key material from another scope.
pub fn open(key_material: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < MIN_SEALED_LEN {
        return Err(CredentialError::DecryptionFailed(
            "ciphertext too short".to_string(),
        ));
    }

    let (salt, rest) = sealed.split_at(SALT_SIZE);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let key = derive_key(key_material, salt)
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CredentialError::DecryptionFailed("authentication tag mismatch".to_string()))
}

/// Generate a new random 256-bit master key.
pub fn generate_master_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_SIZE]);
    rand::thread_rng().fill_bytes(key.as_mut_slice());
    key
}
