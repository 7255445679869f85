// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! AES-256-GCM Symmetric Encryption
//!
//! Authenticated encryption with a generated or imported 256-bit key.
//!
//! **Ciphertext format**:
//! ```text
//! [nonce (12 bytes) | ciphertext+tag (variable length)]
//! ```
//!
//! - Nonce: 12 bytes (96 bits), freshly random per encryption. The fixed
//!   length is the implicit delimiter; there is no separator or prefix.
//! - Ciphertext+Tag: encrypted data plus the 16-byte authentication tag.
//! - Keys are exported/imported as lowercase hex decoding to 32 bytes.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};
use tokio::sync::RwLock;

use super::error::EncryptionError;
use super::metadata::{EncryptionMetadata, AES_GCM_TYPE};
use super::Encryption;

/// Nonce length for AES-GCM (96 bits)
pub const NONCE_LENGTH: usize = 12;

/// Secret key length (256 bits)
pub const KEY_LENGTH: usize = 32;

/// AES-256-GCM cipher instance
///
/// Constructed unkeyed; transitions to "keyed" via [`generate_secret_key`]
/// or [`import_secret_key`]. Every operation that needs the key fails fast
/// with [`EncryptionError::NoSecretKey`] while unkeyed.
///
/// [`generate_secret_key`]: AesGcmEncryption::generate_secret_key
/// [`import_secret_key`]: AesGcmEncryption::import_secret_key
///
/// # Example
///
/// ```ignore
/// let aes = AesGcmEncryption::new();
/// aes.generate_secret_key().await;
///
/// let ciphertext = aes.encrypt(b"hello world").await?;
/// let plaintext = aes.decrypt(&ciphertext, &aes.metadata().await?).await?;
/// ```
#[derive(Default)]
pub struct AesGcmEncryption {
    secret_key: RwLock<Option<[u8; KEY_LENGTH]>>,
}

impl AesGcmEncryption {
    /// Creates an unkeyed cipher instance.
    pub fn new() -> Self {
        Self {
            secret_key: RwLock::new(None),
        }
    }

    /// Creates a cipher instance keyed from a hex-encoded secret key.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::InvalidKeyFormat`] if the hex string has
    /// odd length, contains non-hex characters, or does not decode to
    /// exactly 32 bytes.
    pub async fn from_secret_key(secret_key: &str) -> Result<Self, EncryptionError> {
        let aes = Self::new();
        aes.import_secret_key(secret_key).await?;
        Ok(aes)
    }

    /// Generates a new random 256-bit secret key from OS entropy.
    ///
    /// Replaces any existing key. Usable for both encrypt and decrypt.
    pub async fn generate_secret_key(&self) {
        let mut key = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut key);

        *self.secret_key.write().await = Some(key);
        tracing::debug!("generated new AES-256-GCM secret key");
    }

    /// Exports the current secret key as a lowercase hex string.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::NoSecretKey`] if no key has been
    /// generated or imported.
    pub async fn export_secret_key(&self) -> Result<String, EncryptionError> {
        let key = self
            .secret_key
            .read()
            .await
            .ok_or(EncryptionError::NoSecretKey)?;

        Ok(hex::encode(key))
    }

    /// Decodes a hex-encoded secret key and installs it as the active key.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::InvalidKeyFormat`] if the hex string has
    /// odd length, contains non-hex characters, or does not decode to
    /// exactly 32 bytes.
    pub async fn import_secret_key(&self, secret_key: &str) -> Result<(), EncryptionError> {
        let key_bytes =
            hex::decode(secret_key).map_err(|e| EncryptionError::InvalidKeyFormat {
                reason: e.to_string(),
            })?;

        let key_len = key_bytes.len();
        let key: [u8; KEY_LENGTH] =
            key_bytes
                .try_into()
                .map_err(|_| EncryptionError::InvalidKeyFormat {
                    reason: format!("expected {} bytes, got {}", KEY_LENGTH, key_len),
                })?;

        *self.secret_key.write().await = Some(key);
        Ok(())
    }

    async fn current_key(&self) -> Result<[u8; KEY_LENGTH], EncryptionError> {
        self.secret_key
            .read()
            .await
            .ok_or(EncryptionError::NoSecretKey)
    }
}

#[async_trait]
impl Encryption for AesGcmEncryption {
    fn encryption_type(&self) -> &'static str {
        AES_GCM_TYPE
    }

    async fn metadata(&self) -> Result<EncryptionMetadata, EncryptionError> {
        Ok(EncryptionMetadata::Aes)
    }

    /// Encrypts data with a fresh random 12-byte nonce.
    ///
    /// Returns `nonce || ciphertext+tag`.
    async fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let key = self.current_key().await?;

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| anyhow::anyhow!("failed to create AES-GCM cipher: {}", e))?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), data)
            .map_err(|e| anyhow::anyhow!("AES-GCM encryption failed: {}", e))?;

        let mut encrypted = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        encrypted.extend_from_slice(&nonce_bytes);
        encrypted.extend_from_slice(&ciphertext);

        Ok(encrypted)
    }

    /// Splits the 12-byte nonce off the front and decrypts the remainder.
    ///
    /// The metadata argument is ignored; a symmetric cipher needs no
    /// per-message state beyond the nonce it carries in-band.
    ///
    /// # Errors
    ///
    /// - [`EncryptionError::NoSecretKey`] if no key is present
    /// - [`EncryptionError::TruncatedCiphertext`] if `data` is shorter
    ///   than 12 bytes
    /// - [`EncryptionError::AuthenticationFailed`] if the tag does not
    ///   verify (wrong key or tampered data)
    async fn decrypt(
        &self,
        data: &[u8],
        _metadata: &EncryptionMetadata,
    ) -> Result<Vec<u8>, EncryptionError> {
        let key = self.current_key().await?;

        if data.len() < NONCE_LENGTH {
            return Err(EncryptionError::TruncatedCiphertext {
                expected: NONCE_LENGTH,
                actual: data.len(),
            });
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LENGTH);

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| anyhow::anyhow!("failed to create AES-GCM cipher: {}", e))?;

        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| EncryptionError::AuthenticationFailed)
    }
}
