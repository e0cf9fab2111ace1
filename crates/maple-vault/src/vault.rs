// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential vault: authenticated encryption of provider credentials
//! before they cross the storage boundary.
//!
//! Tokens are `iv_hex:tag_hex:ciphertext_hex`. The pipeline never sees
//! plaintext credentials; only the provider-integration layer calls
//! [`CredentialVault::decrypt`] immediately before use.

use maple_config::VaultConfig;
use maple_core::MapleError;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, IV_LEN, TAG_LEN};

/// The unlocked vault, holding the encryption key in memory.
///
/// Debug output intentionally omits the key.
pub struct CredentialVault {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CredentialVault {
    /// Builds the vault from the `[vault]` config section.
    ///
    /// Fails fast, before any traffic is accepted, when the key is
    /// absent or not exactly 32 bytes.
    pub fn from_config(config: &VaultConfig) -> Result<Self, MapleError> {
        let key = config
            .encryption_key
            .as_deref()
            .ok_or_else(|| MapleError::Integrity("vault.encryption_key is not set".into()))?;
        Self::new(key.as_bytes())
    }

    /// Builds the vault from raw key material (exactly 32 bytes).
    pub fn new(key: &[u8]) -> Result<Self, MapleError> {
        let key: [u8; 32] = key.try_into().map_err(|_| {
            MapleError::Integrity(format!(
                "vault encryption key must be exactly 32 bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    /// Encrypts a credential, returning a storable token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, MapleError> {
        let (iv, tag, ciphertext) = crypto::seal(&self.key, plaintext.as_bytes())?;
        debug!(token_len = ciphertext.len(), "credential sealed");
        Ok(format!(
            "{}:{}:{}",
            hex::encode(iv),
            hex::encode(tag),
            hex::encode(ciphertext)
        ))
    }

    /// Decrypts a stored credential token.
    ///
    /// Fails with an integrity error on malformed tokens or when the
    /// authentication tag does not verify. Error messages never include
    /// plaintext or key material.
    pub fn decrypt(&self, token: &str) -> Result<String, MapleError> {
        let parts: Vec<&str> = token.split(':').collect();
        let [iv_hex, tag_hex, ciphertext_hex] = parts.as_slice() else {
            return Err(MapleError::Integrity(
                "credential token must have exactly three segments".into(),
            ));
        };

        let iv_bytes = decode_segment(iv_hex, "iv")?;
        let iv: [u8; IV_LEN] = iv_bytes
            .try_into()
            .map_err(|_| MapleError::Integrity("credential token iv must be 16 bytes".into()))?;

        let tag_bytes = decode_segment(tag_hex, "tag")?;
        let tag: [u8; TAG_LEN] = tag_bytes
            .try_into()
            .map_err(|_| MapleError::Integrity("credential token tag must be 16 bytes".into()))?;

        let ciphertext = decode_segment(ciphertext_hex, "ciphertext")?;

        let plaintext = crypto::open(&self.key, &iv, &tag, &ciphertext)?;
        String::from_utf8(plaintext)
            .map_err(|_| MapleError::Integrity("decrypted credential is not valid UTF-8".into()))
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, MapleError> {
    hex::decode(segment)
        .map_err(|_| MapleError::Integrity(format!("credential token {name} segment is not hex")))
}

/// Mask a secret value for display: `"ya29...wxyz"` format.
///
/// Shows up to 4 leading and 4 trailing characters. Short values
/// (< 10 chars) are fully masked as `"****"`. Counts characters, not
/// bytes, so multibyte credentials mask cleanly.
pub fn mask_secret(value: &str) -> String {
    if value.chars().count() < 10 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    let suffix: String = {
        let mut tail: Vec<char> = value.chars().rev().take(4).collect();
        tail.reverse();
        tail.into_iter().collect()
    };
    format!("{prefix}...{suffix}")
}
