//! User Public-Key Directory
//!
//! Counterparty encryption public keys are registered on chain in the user
//! contract. That contract binding is an external collaborator; the
//! encryption core consumes it only through [`PublicKeyDirectory`].

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Lookup of registered encryption public keys by user identifier
/// (typically a chain address)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicKeyDirectory: Send + Sync {
    /// Returns the public key registered for `identifier`, or `None` if
    /// the user never registered one.
    async fn lookup_public_key(&self, identifier: &str) -> Result<Option<String>>;
}

/// In-memory directory for tests and local wiring
///
/// Stands in for the on-chain user registry when no chain is available.
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the public key for `identifier`.
    pub async fn register(&self, identifier: impl Into<String>, public_key: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(identifier.into(), public_key.into());
    }
}

#[async_trait]
impl PublicKeyDirectory for InMemoryDirectory {
    async fn lookup_public_key(&self, identifier: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(identifier).cloned())
    }
}
