// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
// Tests for handler dispatch across cipher kinds

use std::sync::Arc;

use ledgermail_sdk::{
    AesGcmEncryption, Encryption, EncryptionError, EncryptionHandler, EncryptionHandlerConfig,
    EncryptionMetadata, AES_GCM_TYPE,
};

/// Encrypt routes by type tag; unknown tags fail naming the tag
#[tokio::test]
async fn test_encrypt_dispatch_and_unknown_tag() {
    let aes = Arc::new(AesGcmEncryption::new());
    aes.generate_secret_key().await;

    let handler = EncryptionHandler::new(EncryptionHandlerConfig {
        encryption_implementations: vec![aes],
    });

    let encrypted = handler
        .encrypt(b"My unencrypted data", AES_GCM_TYPE)
        .await
        .unwrap();
    let decrypted = handler
        .decrypt(&encrypted, &EncryptionMetadata::Aes)
        .await
        .unwrap();
    assert_eq!(decrypted, b"My unencrypted data");

    match handler.encrypt(b"data", "unsupported-type").await {
        Err(EncryptionError::UnsupportedEncryptionType(tag)) => {
            assert_eq!(tag, "unsupported-type")
        }
        other => panic!("Expected UnsupportedEncryptionType, got {:?}", other.err()),
    }
}

/// Decrypt dispatch fails the same way when the metadata names a cipher
/// that is not registered
#[tokio::test]
async fn test_decrypt_dispatch_unregistered_cipher() {
    let handler = EncryptionHandler::default();

    let metadata = EncryptionMetadata::EcdhAes {
        sender_public_key: "02sender".to_string(),
        receiver_public_key: "03receiver".to_string(),
    };

    match handler.decrypt(b"opaque", &metadata).await {
        Err(EncryptionError::UnsupportedEncryptionType(tag)) => assert_eq!(tag, "ecdh-aes"),
        other => panic!("Expected UnsupportedEncryptionType, got {:?}", other.err()),
    }
}

/// Cipher errors pass through the handler unwrapped
#[tokio::test]
async fn test_cipher_errors_pass_through() {
    // Default handler carries an unkeyed AES instance
    let handler = EncryptionHandler::default();

    let result = handler.encrypt(b"data", AES_GCM_TYPE).await;
    assert!(matches!(result, Err(EncryptionError::NoSecretKey)));
}

/// get_encryption exposes the registered instance for cipher-specific
/// calls
#[tokio::test]
async fn test_get_encryption_accessor() {
    let handler = EncryptionHandler::default();

    let cipher = handler.get_encryption(AES_GCM_TYPE).unwrap();
    assert_eq!(cipher.encryption_type(), AES_GCM_TYPE);

    assert!(matches!(
        handler.get_encryption("missing"),
        Err(EncryptionError::UnsupportedEncryptionType(_))
    ));
}
