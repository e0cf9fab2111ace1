// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-at-rest protection for Maple mailbox credentials.
//!
//! AES-256-GCM with a 128-bit random IV and a detached 16-byte
//! authentication tag, serialized as `iv_hex:tag_hex:ciphertext_hex`.
//! The key comes from process configuration and is validated before any
//! traffic is accepted.

pub mod crypto;
pub mod vault;

pub use vault::{CredentialVault, mask_secret};
