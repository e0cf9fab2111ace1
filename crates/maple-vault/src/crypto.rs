// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations with a 128-bit IV.
//!
//! Every call to [`seal`] generates a fresh random 128-bit IV via the
//! system CSPRNG. IV reuse would be catastrophic for GCM security. The
//! authentication tag is returned detached so the caller can store the
//! three parts (IV, tag, ciphertext) separately.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce};
use maple_core::MapleError;
use rand::RngCore;
use rand::rngs::OsRng;

/// AES-256-GCM instantiated with a 16-byte nonce, matching the stored
/// credential token format.
type Cipher = AesGcm<Aes256, U16>;

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// IV length in bytes (128-bit).
pub const IV_LEN: usize = 16;

/// Encrypt plaintext with AES-256-GCM under a random 128-bit IV.
///
/// Returns `(iv, tag, ciphertext)` with the tag detached from the
/// ciphertext.
pub fn seal(
    key: &[u8; 32],
    plaintext: &[u8],
) -> Result<([u8; IV_LEN], [u8; TAG_LEN], Vec<u8>), MapleError> {
    let cipher = Cipher::new(Key::<Cipher>::from_slice(key));

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    let nonce = Nonce::<U16>::from_slice(&iv);

    // encrypt() appends the 16-byte tag; split it off.
    let mut sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| MapleError::Integrity("AES-256-GCM encryption failed".into()))?;
    let split = sealed.len() - TAG_LEN;
    let tag_bytes = sealed.split_off(split);
    let tag: [u8; TAG_LEN] = tag_bytes
        .try_into()
        .map_err(|_| MapleError::Integrity("unexpected authentication tag length".into()))?;

    Ok((iv, tag, sealed))
}

/// Decrypt ciphertext with AES-256-GCM, verifying the detached tag.
///
/// Returns the plaintext, or an error if the key is wrong or the data
/// was tampered with.
pub fn open(
    key: &[u8; 32],
    iv: &[u8; IV_LEN],
    tag: &[u8; TAG_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, MapleError> {
    let cipher = Cipher::new(Key::<Cipher>::from_slice(key));
    let nonce = Nonce::<U16>::from_slice(iv);

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(nonce, sealed.as_slice())
        .map_err(|_| MapleError::Integrity("authentication tag verification failed".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key();
        let plaintext = b"ya29.refresh-token-value";

        let (iv, tag, ciphertext) = seal(&key, plaintext).unwrap();
        let decrypted = open(&key, &iv, &tag, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn seal_produces_different_iv_and_ciphertext_for_same_plaintext() {
        let key = test_key();
        let plaintext = b"same input twice";

        let (iv1, _, ct1) = seal(&key, plaintext).unwrap();
        let (iv2, _, ct2) = seal(&key, plaintext).unwrap();

        assert_ne!(iv1, iv2);
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let key1 = test_key();
        let key2 = test_key();
        let (iv, tag, ciphertext) = seal(&key1, b"secret data").unwrap();

        assert!(open(&key2, &iv, &tag, &ciphertext).is_err());
    }

    #[test]
    fn ciphertext_length_equals_plaintext_length() {
        let key = test_key();
        let (_, _, ciphertext) = seal(&key, b"hello").unwrap();
        // Tag is detached, so ciphertext length matches plaintext.
        assert_eq!(ciphertext.len(), 5);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = test_key();
        let (iv, tag, ciphertext) = seal(&key, b"").unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(open(&key, &iv, &tag, &ciphertext).unwrap(), b"");
    }

    #[test]
    fn tampered_tag_fails_decryption() {
        let key = test_key();
        let (iv, mut tag, ciphertext) = seal(&key, b"do not tamper").unwrap();
        tag[0] ^= 0x01;

        assert!(open(&key, &iv, &tag, &ciphertext).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_decryption() {
        let key = test_key();
        let (iv, tag, mut ciphertext) = seal(&key, b"do not tamper").unwrap();
        ciphertext[0] ^= 0x01;

        assert!(open(&key, &iv, &tag, &ciphertext).is_err());
    }
}
