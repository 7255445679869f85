//! Encryption Metadata Codec
//!
//! Every ciphertext travels with a small JSON metadata object describing
//! which cipher produced it. The `type` field is the discriminant the
//! [`EncryptionHandler`](crate::crypto::EncryptionHandler) dispatches on
//! when decrypting; the key-exchange variant additionally carries both
//! parties' public keys so either side of a conversation can resolve its
//! counterparty.
//!
//! Wire format (UTF-8 JSON):
//!
//! ```text
//! {"type":"aes-gcm"}
//! {"type":"ecdh-aes","senderPublicKey":"02ab…","receiverPublicKey":"03cd…"}
//! ```

use serde::{Deserialize, Serialize};

use super::error::EncryptionError;

/// Type tag of the symmetric AES-256-GCM cipher
pub const AES_GCM_TYPE: &str = "aes-gcm";

/// Type tag of the ECDH-derived AES cipher
pub const ECDH_AES_TYPE: &str = "ecdh-aes";

/// Per-message encryption metadata, tagged by cipher type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncryptionMetadata {
    /// Plain symmetric encryption; the key travels out of band
    #[serde(rename = "aes-gcm")]
    Aes,

    /// Key-exchange-derived encryption; carries both parties' public keys
    /// so a decrypting party (sender or receiver of the original message)
    /// can determine its counterparty
    #[serde(rename = "ecdh-aes", rename_all = "camelCase")]
    EcdhAes {
        sender_public_key: String,
        receiver_public_key: String,
    },
}

impl EncryptionMetadata {
    /// Returns the type tag used for handler dispatch.
    pub fn type_tag(&self) -> &'static str {
        match self {
            EncryptionMetadata::Aes => AES_GCM_TYPE,
            EncryptionMetadata::EcdhAes { .. } => ECDH_AES_TYPE,
        }
    }

    /// Serializes the metadata to its JSON wire format.
    pub fn encode(&self) -> Result<String, EncryptionError> {
        serde_json::to_string(self).map_err(|e| EncryptionError::MalformedMetadata {
            reason: e.to_string(),
        })
    }

    /// Parses metadata from its JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::MalformedMetadata`] if the input is not
    /// valid JSON, the `type` discriminant is unknown, or a required field
    /// is missing. Callers that treat "no metadata" as "not encrypted" can
    /// match on this variant; during decrypt dispatch it is fatal for the
    /// item being decrypted.
    pub fn decode(encoded: &str) -> Result<Self, EncryptionError> {
        serde_json::from_str(encoded).map_err(|e| EncryptionError::MalformedMetadata {
            reason: e.to_string(),
        })
    }
}
