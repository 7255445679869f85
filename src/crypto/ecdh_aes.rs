// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! ECDH-Derived AES Encryption
//!
//! AES-GCM keyed from a shared secret the encryptor computes with a
//! counterparty's public key. The raw secret never becomes a key
//! directly: it is normalized through SHA-256 and the lowercase hex
//! digest is imported as the 256-bit AES key.
//!
//! One instance supports one active *outgoing* counterparty at a time
//! (whichever [`initialize`](EcdhAesEncryption::initialize) ran last),
//! while decryption is counterparty-agnostic per call: each decrypt
//! resolves the other party from the message metadata and keys a fresh,
//! short-lived [`AesGcmEncryption`], so a long-lived registry-held
//! instance can decrypt messages from any number of peers.
//!
//! Derived secrets are cached per ordered public-key pair for the life of
//! the instance, so repeated traffic with the same peer does not
//! round-trip through the encryptor (which may be slow or interactive).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use super::aes_gcm::AesGcmEncryption;
use super::error::EncryptionError;
use super::metadata::{EncryptionMetadata, ECDH_AES_TYPE};
use super::Encryption;
use crate::encryptor::{EncryptorService, SharedSecretProvider};
use crate::user::PublicKeyDirectory;

/// Key-exchange cipher instance
pub struct EcdhAesEncryption {
    encryptor: Arc<dyn EncryptorService>,
    aes_encryption: AesGcmEncryption,
    receiver_public_key: RwLock<Option<String>>,
    shared_secrets: RwLock<HashMap<String, String>>,
}

impl EcdhAesEncryption {
    /// Creates an uninitialized cipher bound to an encryptor service.
    pub fn new(encryptor: Arc<dyn EncryptorService>) -> Self {
        Self {
            encryptor,
            aes_encryption: AesGcmEncryption::new(),
            receiver_public_key: RwLock::new(None),
            shared_secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Prepares the cipher for encrypting to `receiver_address`.
    ///
    /// Looks up the receiver's registered public key, derives (or loads
    /// from cache) the shared secret, and imports its digest as the key
    /// of the internal cipher. Must be called before
    /// [`encrypt`](Encryption::encrypt). Either fully succeeds or leaves
    /// the instance unkeyed.
    ///
    /// # Errors
    ///
    /// - [`EncryptionError::CounterpartyKeyUnavailable`] if no public key
    ///   is registered for `receiver_address`
    /// - [`EncryptionError::PublicKeyUnavailable`] /
    ///   [`EncryptionError::SharedSecretUnavailable`] if the encryptor
    ///   cannot provide its key or compute the secret
    pub async fn initialize(&self, receiver_address: &str) -> Result<(), EncryptionError> {
        let receiver_public_key = self
            .encryptor
            .lookup_public_key(receiver_address)
            .await?
            .ok_or_else(|| EncryptionError::CounterpartyKeyUnavailable {
                identifier: receiver_address.to_string(),
            })?;

        let shared_secret = self.shared_secret(&receiver_public_key).await?;
        self.aes_encryption.import_secret_key(&shared_secret).await?;

        *self.receiver_public_key.write().await = Some(receiver_public_key);
        Ok(())
    }

    /// Derives the shared secret with `public_key`, consulting and
    /// populating the per-pair cache.
    ///
    /// The cache key is `"<ownPublicKey>-<counterpartyPublicKey>"`; the
    /// own key is fetched per lookup. Concurrent derivations for the same
    /// pair may race; that only duplicates work, both compute the same
    /// value.
    async fn shared_secret(&self, public_key: &str) -> Result<String, EncryptionError> {
        let own_public_key = self.own_public_key().await?;
        let cache_key = format!("{}-{}", own_public_key, public_key);

        if let Some(secret) = self.shared_secrets.read().await.get(&cache_key) {
            tracing::debug!(counterparty = public_key, "shared secret cache hit");
            return Ok(secret.clone());
        }

        let raw_secret = self
            .encryptor
            .compute_shared_secret(public_key)
            .await?
            .ok_or_else(|| EncryptionError::SharedSecretUnavailable {
                public_key: public_key.to_string(),
            })?;

        // Normalize the arbitrary-length raw secret to AES key material
        let shared_secret = hex::encode(Sha256::digest(raw_secret.as_bytes()));

        self.shared_secrets
            .write()
            .await
            .insert(cache_key, shared_secret.clone());
        tracing::debug!(counterparty = public_key, "🔑 derived and cached shared secret");

        Ok(shared_secret)
    }

    async fn own_public_key(&self) -> Result<String, EncryptionError> {
        self.encryptor
            .own_public_key()
            .await?
            .ok_or(EncryptionError::PublicKeyUnavailable)
    }
}

#[async_trait]
impl Encryption for EcdhAesEncryption {
    fn encryption_type(&self) -> &'static str {
        ECDH_AES_TYPE
    }

    /// Metadata carrying both parties' public keys.
    ///
    /// # Errors
    ///
    /// - [`EncryptionError::PublicKeyUnavailable`] if the own public key
    ///   cannot be retrieved
    /// - [`EncryptionError::NotInitialized`] if
    ///   [`initialize`](EcdhAesEncryption::initialize) was never called
    async fn metadata(&self) -> Result<EncryptionMetadata, EncryptionError> {
        let sender_public_key = self.own_public_key().await?;

        let receiver_public_key = self
            .receiver_public_key
            .read()
            .await
            .clone()
            .ok_or(EncryptionError::NotInitialized)?;

        Ok(EncryptionMetadata::EcdhAes {
            sender_public_key,
            receiver_public_key,
        })
    }

    /// Delegates to the internal cipher keyed by `initialize`.
    async fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        self.aes_encryption.encrypt(data).await
    }

    /// Decrypts a message from either direction of a conversation.
    ///
    /// The counterparty is whichever of the metadata's sender/receiver
    /// keys is not our own: the original receiver sees the sender as its
    /// counterparty, the original sender (decrypting its own sent mail)
    /// sees the receiver. A fresh short-lived cipher is keyed per call so
    /// the instance's `initialize` state is neither required nor touched.
    async fn decrypt(
        &self,
        data: &[u8],
        metadata: &EncryptionMetadata,
    ) -> Result<Vec<u8>, EncryptionError> {
        let (sender_public_key, receiver_public_key) = match metadata {
            EncryptionMetadata::EcdhAes {
                sender_public_key,
                receiver_public_key,
            } => (sender_public_key, receiver_public_key),
            other => {
                return Err(EncryptionError::InvalidMetadata {
                    reason: format!(
                        "expected {} metadata, got {}",
                        ECDH_AES_TYPE,
                        other.type_tag()
                    ),
                })
            }
        };

        let own_public_key = self.own_public_key().await?;
        let counterparty_public_key = if sender_public_key == &own_public_key {
            receiver_public_key
        } else {
            sender_public_key
        };

        let shared_secret = self.shared_secret(counterparty_public_key).await?;

        let aes_encryption = AesGcmEncryption::from_secret_key(&shared_secret).await?;
        aes_encryption.decrypt(data, metadata).await
    }
}
