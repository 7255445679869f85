// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Ledgermail SDK client-side encryption core
//!
//! Applications exchange encrypted messages and mail over a
//! blockchain-backed storage/event layer. This crate provides the
//! encryption subsystem: a pluggable cipher registry, AES-256-GCM
//! symmetric encryption, an ECDH-derived shared-secret cipher with
//! per-counterparty secret caching, and the metadata codec that lets a
//! decrypting party pick the right cipher. Chain bindings, storage
//! providers and the encryptor extension transport are consumed through
//! capability traits and injected by the embedding application.

pub mod crypto;
pub mod encryptor;
pub mod storage;
pub mod user;

// Re-export the encryption subsystem surface
pub use crypto::{
    AesGcmEncryption, EcdhAesEncryption, Encryption, EncryptionError, EncryptionHandler,
    EncryptionHandlerConfig, EncryptionMetadata, AES_GCM_TYPE, ECDH_AES_TYPE,
};

// Re-export capability boundaries
pub use encryptor::{
    Encryptor, EncryptorConfig, EncryptorExtension, EncryptorService, EncryptorState,
    LocalEncryptor, SharedSecretProvider,
};
pub use storage::{InMemoryStorageProvider, RemoteStorageProvider};
pub use user::{InMemoryDirectory, PublicKeyDirectory};
