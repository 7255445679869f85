// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Encryption Subsystem
//!
//! Pluggable encryption for messages and mail payloads:
//!
//! - **AES-GCM**: self-contained authenticated encryption with a
//!   generated or imported 256-bit key
//! - **ECDH-AES**: AES keyed from a shared secret computed by the
//!   encryptor capability, with per-counterparty secret caching
//! - **Handler**: type-tag-keyed dispatch table over cipher instances
//! - **Metadata**: JSON codec for the per-message metadata that tells a
//!   decrypting party which cipher (and which counterparty keys) to use
//!
//! ## Security Considerations
//!
//! - Secret keys live in memory only; callers persist exported keys
//! - Nonces are freshly random per encryption, never reused
//! - Key-exchange keys are always a SHA-256 digest of the raw shared
//!   secret, never the raw secret itself
//!
//! ## Flow
//!
//! 1. Caller asks the handler to encrypt a payload under a chosen type
//! 2. The resolved cipher encrypts and reports its metadata
//! 3. Ciphertext and encoded metadata are persisted together (chain event
//!    or off-chain blob)
//! 4. On retrieval, metadata is decoded and the handler dispatches the
//!    decrypt to the same cipher type, which reconstructs any
//!    cipher-specific state (e.g. re-deriving a shared secret from the
//!    counterparty key in the metadata)

pub mod aes_gcm;
pub mod ecdh_aes;
pub mod error;
pub mod handler;
pub mod metadata;

use async_trait::async_trait;

pub use aes_gcm::AesGcmEncryption;
pub use ecdh_aes::EcdhAesEncryption;
pub use error::EncryptionError;
pub use handler::{EncryptionHandler, EncryptionHandlerConfig};
pub use metadata::{EncryptionMetadata, AES_GCM_TYPE, ECDH_AES_TYPE};

/// A cipher instance usable by the [`EncryptionHandler`]
///
/// Implementations are identified by a unique type tag and must be safe
/// to share across tasks; key state lives behind interior mutability.
#[async_trait]
pub trait Encryption: Send + Sync {
    /// Unique type tag identifying this cipher (handler map key and
    /// metadata discriminant).
    fn encryption_type(&self) -> &'static str;

    /// Metadata describing this cipher's current encryption parameters,
    /// persisted alongside every ciphertext it produces.
    async fn metadata(&self) -> Result<EncryptionMetadata, EncryptionError>;

    /// Encrypts `data`, returning the wire-format ciphertext.
    async fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError>;

    /// Decrypts wire-format `data` produced by a cipher of the same type,
    /// interpreting its own metadata shape.
    async fn decrypt(
        &self,
        data: &[u8],
        metadata: &EncryptionMetadata,
    ) -> Result<Vec<u8>, EncryptionError>;
}
