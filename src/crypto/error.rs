// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! Encryption Error Types
//!
//! One error enum for the whole encryption subsystem, split along the
//! failure classes callers need to tell apart:
//!
//! - **Configuration**: the cipher was used before it was keyed or
//!   initialized. Surfaced before any cryptographic work is attempted.
//! - **Input validation**: malformed hex keys, truncated ciphertext,
//!   malformed or wrong-shaped metadata. A caller/data bug, not transient.
//! - **Cryptographic**: the authentication tag did not verify. Distinct
//!   from the configuration errors so callers can tell "tampered data or
//!   wrong key" apart from "cipher was never keyed".
//! - **External dependency**: a counterparty has no registered public key,
//!   or the encryptor could not produce a key or secret. Propagated
//!   immediately, never retried here.
//! - **Dispatch**: no cipher registered for the requested type tag.

use thiserror::Error;

/// Error type for all encryption subsystem operations
#[derive(Error, Debug)]
pub enum EncryptionError {
    /// Cipher operation attempted before a key was generated or imported
    #[error("secret key has not been generated or imported")]
    NoSecretKey,

    /// Key-exchange cipher used before `initialize` recorded a receiver
    #[error("cipher has not been initialized with a receiver")]
    NotInitialized,

    /// Secret key hex string failed to decode to a 256-bit key
    #[error("invalid secret key format: {reason}")]
    InvalidKeyFormat {
        /// Specific decode failure (odd length, non-hex character, wrong size)
        reason: String,
    },

    /// Ciphertext shorter than the 12-byte nonce prefix
    #[error("ciphertext too short to contain a nonce: expected at least {expected} bytes, got {actual}")]
    TruncatedCiphertext { expected: usize, actual: usize },

    /// Metadata decoded, but has the wrong shape for the dispatched cipher
    #[error("invalid encryption metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// Metadata string is not valid metadata JSON
    #[error("malformed encryption metadata: {reason}")]
    MalformedMetadata { reason: String },

    /// AEAD authentication tag mismatch (wrong key or tampered ciphertext)
    #[error("authentication failed: wrong key or tampered ciphertext")]
    AuthenticationFailed,

    /// No encryption public key is registered for the given identifier
    #[error("no encryption public key registered for {identifier}")]
    CounterpartyKeyUnavailable { identifier: String },

    /// Own public key could not be retrieved from the encryptor
    #[error("public key could not be retrieved from the encryptor")]
    PublicKeyUnavailable,

    /// Encryptor declined to compute a shared secret for the given key
    #[error("encryptor was not able to compute a shared secret for public key {public_key}")]
    SharedSecretUnavailable { public_key: String },

    /// No cipher registered under the requested type tag
    #[error("unsupported encryption type: {0}")]
    UnsupportedEncryptionType(String),

    /// Transport-level failure from an external capability (signer
    /// extension, directory lookup, storage)
    #[error(transparent)]
    Encryptor(#[from] anyhow::Error),
}
