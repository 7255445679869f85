// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Encryptor Capability
//!
//! The encryptor holds the user's key-exchange keypair and performs ECDH
//! on its behalf; the private key never reaches this crate. In the browser
//! it is a signer extension reached over an event transport, natively it
//! is [`LocalEncryptor`]. The transport itself (request/response
//! correlation, handshake, heartbeat) is an external collaborator;
//! implementations surface here only through [`EncryptorExtension`].
//!
//! [`Encryptor`] combines an extension with the user public-key directory
//! into the service the key-exchange cipher consumes.

pub mod local;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::user::PublicKeyDirectory;

pub use local::LocalEncryptor;

/// Lifecycle state of the user's encryptor keypair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncryptorState {
    /// No keypair has been generated yet
    NotGenerated,
    /// Keypair exists but is locked behind user interaction
    Locked,
    /// Keypair is available for use
    Unlocked,
}

impl fmt::Display for EncryptorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EncryptorState::NotGenerated => "not-generated",
            EncryptorState::Locked => "locked",
            EncryptorState::Unlocked => "unlocked",
        };
        f.write_str(s)
    }
}

/// The raw encryptor boundary: key state, own public key and ECDH
///
/// Implemented by the browser-extension connector and by
/// [`LocalEncryptor`]. Failures at this boundary are transport-level and
/// reported as [`anyhow::Error`]; "no key available" is `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncryptorExtension: Send + Sync {
    /// Current keypair lifecycle state.
    async fn state(&self) -> Result<EncryptorState>;

    /// The user's key-exchange public key, if one exists.
    async fn public_key(&self) -> Result<Option<String>>;

    /// Scheme label of the public key (e.g. `secp256k1`), recorded next
    /// to the key when it is registered on chain.
    fn public_key_type(&self) -> String;

    /// Raw ECDH shared secret between the user's private key and
    /// `public_key`. Pre-hash; the cipher normalizes it.
    async fn compute_shared_secret_key(&self, public_key: &str) -> Result<Option<String>>;
}

/// Signer capability consumed by the key-exchange cipher
///
/// Deliberately minimal: own public key and shared-secret computation,
/// nothing else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SharedSecretProvider: Send + Sync {
    /// The user's own key-exchange public key.
    async fn own_public_key(&self) -> Result<Option<String>>;

    /// Raw (pre-hash) ECDH shared secret with `public_key`.
    async fn compute_shared_secret(&self, public_key: &str) -> Result<Option<String>>;
}

/// Everything the key-exchange cipher needs: shared-secret computation
/// plus counterparty key lookup
pub trait EncryptorService: SharedSecretProvider + PublicKeyDirectory {}

impl<T: SharedSecretProvider + PublicKeyDirectory> EncryptorService for T {}

/// Configuration for creating an [`Encryptor`]
pub struct EncryptorConfig {
    /// The encryptor extension performing key storage and ECDH
    pub encryptor_extension: Arc<dyn EncryptorExtension>,
    /// Directory of registered user public keys
    pub public_key_directory: Arc<dyn PublicKeyDirectory>,
}

/// Service façade over the encryptor extension and the user directory
///
/// Provides public-key retrieval and shared-secret computation to the
/// key-exchange cipher, and lets applications query extension state and
/// counterparty registration.
pub struct Encryptor {
    extension: Arc<dyn EncryptorExtension>,
    directory: Arc<dyn PublicKeyDirectory>,
}

impl Encryptor {
    /// Creates a new encryptor service.
    pub fn new(config: EncryptorConfig) -> Self {
        Self {
            extension: config.encryptor_extension,
            directory: config.public_key_directory,
        }
    }

    /// Current lifecycle state of the underlying extension.
    pub async fn state(&self) -> Result<EncryptorState> {
        self.extension.state().await
    }

    /// Scheme label of the user's public key.
    pub fn public_key_type(&self) -> String {
        self.extension.public_key_type()
    }

    /// Retrieves the public key registered for `address`.
    ///
    /// A failed directory read (e.g. the user was never registered and
    /// the contract reverts the query) is reported as "no key", matching
    /// how callers treat unregistered counterparties.
    pub async fn retrieve_user_public_key(&self, address: &str) -> Option<String> {
        match self.directory.lookup_public_key(address).await {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!(address, error = %e, "public key lookup failed");
                None
            }
        }
    }

    /// Whether `address` has a registered encryption public key.
    pub async fn is_user_address_initialized(&self, address: &str) -> bool {
        self.retrieve_user_public_key(address).await.is_some()
    }
}

#[async_trait]
impl SharedSecretProvider for Encryptor {
    async fn own_public_key(&self) -> Result<Option<String>> {
        self.extension.public_key().await
    }

    async fn compute_shared_secret(&self, public_key: &str) -> Result<Option<String>> {
        self.extension.compute_shared_secret_key(public_key).await
    }
}

#[async_trait]
impl PublicKeyDirectory for Encryptor {
    async fn lookup_public_key(&self, identifier: &str) -> Result<Option<String>> {
        Ok(self.retrieve_user_public_key(identifier).await)
    }
}
