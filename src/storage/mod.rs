// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Remote Storage Boundary
//!
//! Encrypted payloads too large for a chain event are stored off chain
//! and referenced by locator. The providers themselves (hosted gateways,
//! decentralized storage networks) are external collaborators; the SDK
//! consumes them only through [`RemoteStorageProvider`].

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// Blob store boundary: `store(bytes) -> locator`, `retrieve(locator) -> bytes`
#[async_trait]
pub trait RemoteStorageProvider: Send + Sync {
    /// Stores `data` and returns a locator for later retrieval.
    async fn store(&self, data: &[u8]) -> Result<String>;

    /// Retrieves the blob previously stored under `locator`.
    async fn retrieve(&self, locator: &str) -> Result<Vec<u8>>;
}

/// Content-addressed in-memory provider for tests and local wiring
///
/// Locators are the hex-encoded SHA-256 digest of the stored bytes.
#[derive(Default)]
pub struct InMemoryStorageProvider {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorageProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RemoteStorageProvider for InMemoryStorageProvider {
    async fn store(&self, data: &[u8]) -> Result<String> {
        let locator = hex::encode(Sha256::digest(data));
        self.blobs
            .write()
            .await
            .insert(locator.clone(), data.to_vec());
        Ok(locator)
    }

    async fn retrieve(&self, locator: &str) -> Result<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(locator)
            .cloned()
            .ok_or_else(|| anyhow!("no blob stored under locator {}", locator))
    }
}
