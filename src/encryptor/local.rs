// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
//! In-Process Encryptor
//!
//! [`EncryptorExtension`] implementation holding a secp256k1 keypair in
//! memory. Used by native applications, servers and tests, where no
//! browser extension is present. The curve matches the one used by the
//! chain accounts, so keys registered on chain interoperate with
//! extension-held keys.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use k256::{elliptic_curve::sec1::FromEncodedPoint, EncodedPoint, PublicKey, SecretKey};
use rand::rngs::OsRng;

use super::{EncryptorExtension, EncryptorState};

/// Encryptor backed by an in-memory secp256k1 secret key
///
/// Public keys are exchanged as hex-encoded compressed SEC1 points
/// (33 bytes); the raw shared secret is the hex-encoded x-coordinate of
/// the ECDH output, which the key-exchange cipher then hashes.
pub struct LocalEncryptor {
    secret_key: SecretKey,
}

impl LocalEncryptor {
    /// Generates a fresh random keypair from OS entropy.
    pub fn random() -> Self {
        Self {
            secret_key: SecretKey::random(&mut OsRng),
        }
    }

    /// Builds an encryptor from 32 raw secret-key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|e| anyhow!("failed to parse secp256k1 secret key: {}", e))?;
        Ok(Self { secret_key })
    }

    /// Hex-encoded compressed SEC1 public key for this keypair.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.secret_key.public_key().to_sec1_bytes())
    }

    fn parse_public_key(public_key: &str) -> Result<PublicKey> {
        let key_bytes = hex::decode(public_key)
            .map_err(|e| anyhow!("failed to decode public key hex: {}", e))?;

        // Compressed (33 bytes) or uncompressed (65 bytes) SEC1
        if key_bytes.len() != 33 && key_bytes.len() != 65 {
            return Err(anyhow!(
                "invalid public key size: expected 33 or 65 bytes, got {}",
                key_bytes.len()
            ));
        }

        let encoded_point = EncodedPoint::from_bytes(&key_bytes)
            .map_err(|e| anyhow!("failed to parse public key point: {}", e))?;

        let public_key = PublicKey::from_encoded_point(&encoded_point);
        if public_key.is_some().into() {
            Ok(public_key.unwrap())
        } else {
            Err(anyhow!("public key is not a valid curve point"))
        }
    }
}

#[async_trait]
impl EncryptorExtension for LocalEncryptor {
    async fn state(&self) -> Result<EncryptorState> {
        // An in-memory key is always usable
        Ok(EncryptorState::Unlocked)
    }

    async fn public_key(&self) -> Result<Option<String>> {
        Ok(Some(self.public_key_hex()))
    }

    fn public_key_type(&self) -> String {
        "secp256k1".to_string()
    }

    async fn compute_shared_secret_key(&self, public_key: &str) -> Result<Option<String>> {
        let counterparty = Self::parse_public_key(public_key)?;

        let shared_secret = k256::ecdh::diffie_hellman(
            self.secret_key.to_nonzero_scalar(),
            counterparty.as_affine(),
        );

        Ok(Some(hex::encode(shared_secret.raw_secret_bytes())))
    }
}
