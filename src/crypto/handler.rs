// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Encryption Handler
//!
//! Dispatch table mapping cipher type tags to cipher instances. Pure
//! dispatch: no I/O of its own and no error wrapping beyond the
//! unsupported-type failure. Whatever the delegated cipher raises passes
//! through unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use super::aes_gcm::AesGcmEncryption;
use super::error::EncryptionError;
use super::metadata::EncryptionMetadata;
use super::Encryption;

/// Configuration for creating an [`EncryptionHandler`]
#[derive(Default)]
pub struct EncryptionHandlerConfig {
    /// Cipher instances to register, keyed by their own type tags
    pub encryption_implementations: Vec<Arc<dyn Encryption>>,
}

/// Directory of cipher instances, keyed by type tag
pub struct EncryptionHandler {
    encryption_map: HashMap<&'static str, Arc<dyn Encryption>>,
}

impl EncryptionHandler {
    /// Creates a handler from the given configuration.
    ///
    /// A default (unkeyed) [`AesGcmEncryption`] is pre-registered; a
    /// configured instance with the same type tag overrides it.
    pub fn new(config: EncryptionHandlerConfig) -> Self {
        let mut handler = Self {
            encryption_map: HashMap::new(),
        };

        handler.add_encryption_instance(Arc::new(AesGcmEncryption::new()));
        for encryption in config.encryption_implementations {
            handler.add_encryption_instance(encryption);
        }

        handler
    }

    /// Registers a cipher instance, overwriting any existing entry for
    /// its type tag.
    pub fn add_encryption_instance(&mut self, encryption: Arc<dyn Encryption>) {
        let encryption_type = encryption.encryption_type();
        tracing::debug!(encryption_type, "registered encryption implementation");
        self.encryption_map.insert(encryption_type, encryption);
    }

    /// Encrypts `data` with the cipher registered for `encryption_type`.
    ///
    /// # Errors
    ///
    /// [`EncryptionError::UnsupportedEncryptionType`] if no cipher is
    /// registered for the tag; otherwise whatever the cipher raises.
    pub async fn encrypt(
        &self,
        data: &[u8],
        encryption_type: &str,
    ) -> Result<Vec<u8>, EncryptionError> {
        let encryption = self.get_encryption(encryption_type)?;
        encryption.encrypt(data).await
    }

    /// Decrypts `data` with the cipher named by the metadata's type tag,
    /// passing the metadata through for the cipher to interpret.
    pub async fn decrypt(
        &self,
        data: &[u8],
        metadata: &EncryptionMetadata,
    ) -> Result<Vec<u8>, EncryptionError> {
        let encryption = self.get_encryption(metadata.type_tag())?;
        encryption.decrypt(data, metadata).await
    }

    /// Returns the cipher registered for `encryption_type`.
    ///
    /// Used by higher layers to reach cipher-specific methods that are
    /// not part of the generic [`Encryption`] contract.
    pub fn get_encryption(
        &self,
        encryption_type: &str,
    ) -> Result<Arc<dyn Encryption>, EncryptionError> {
        self.encryption_map
            .get(encryption_type)
            .cloned()
            .ok_or_else(|| {
                EncryptionError::UnsupportedEncryptionType(encryption_type.to_string())
            })
    }
}

impl Default for EncryptionHandler {
    fn default() -> Self {
        Self::new(EncryptionHandlerConfig::default())
    }
}
