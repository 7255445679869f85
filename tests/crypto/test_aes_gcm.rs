// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
// Tests for the AES-256-GCM cipher wire behavior

use ledgermail_sdk::{AesGcmEncryption, Encryption, EncryptionError, EncryptionMetadata};

/// Test 1: round-trip across a spread of payload sizes
#[tokio::test]
async fn test_round_trip_various_sizes() {
    let aes = AesGcmEncryption::new();
    aes.generate_secret_key().await;

    for size in [0usize, 1, 15, 16, 17, 1024, 65_536] {
        let plaintext: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

        let encrypted = aes.encrypt(&plaintext).await.unwrap();
        let decrypted = aes
            .decrypt(&encrypted, &EncryptionMetadata::Aes)
            .await
            .unwrap();

        assert_eq!(decrypted, plaintext, "round-trip failed for size {}", size);
    }
}

/// Test 2: exported key imported into a second instance decrypts the
/// first instance's output
#[tokio::test]
async fn test_key_export_import_interoperates() {
    let original = AesGcmEncryption::new();
    original.generate_secret_key().await;
    let exported = original.export_secret_key().await.unwrap();

    // Lowercase hex, even length, 32 bytes
    assert_eq!(exported.len(), 64);
    assert_eq!(exported, exported.to_lowercase());

    let imported = AesGcmEncryption::from_secret_key(&exported).await.unwrap();

    let encrypted = original.encrypt(b"shared key material").await.unwrap();
    let decrypted = imported
        .decrypt(&encrypted, &EncryptionMetadata::Aes)
        .await
        .unwrap();
    assert_eq!(decrypted, b"shared key material");
}

/// Test 3: same plaintext encrypts to different ciphertexts (random
/// nonce), both decrypting back
#[tokio::test]
async fn test_encryption_is_nondeterministic() {
    let aes = AesGcmEncryption::new();
    aes.generate_secret_key().await;

    let first = aes.encrypt(b"repeated message").await.unwrap();
    let second = aes.encrypt(b"repeated message").await.unwrap();

    assert_ne!(first, second);
    assert_ne!(&first[..12], &second[..12], "nonces must differ");

    let metadata = EncryptionMetadata::Aes;
    assert_eq!(
        aes.decrypt(&first, &metadata).await.unwrap(),
        b"repeated message"
    );
    assert_eq!(
        aes.decrypt(&second, &metadata).await.unwrap(),
        b"repeated message"
    );
}

/// Test 4: flipping any single bit of the ciphertext or tag is detected
#[tokio::test]
async fn test_bit_flips_fail_authentication() {
    let aes = AesGcmEncryption::new();
    aes.generate_secret_key().await;

    let encrypted = aes.encrypt(b"integrity protected").await.unwrap();

    // Every byte position past the nonce: ciphertext body and tag
    for position in 12..encrypted.len() {
        let mut corrupted = encrypted.clone();
        corrupted[position] ^= 0x01;

        let result = aes.decrypt(&corrupted, &EncryptionMetadata::Aes).await;
        assert!(
            matches!(result, Err(EncryptionError::AuthenticationFailed)),
            "corruption at byte {} was not detected",
            position
        );
    }
}

/// Test 5: inputs shorter than the nonce are rejected with a truncation
/// error, not a panic or a low-level failure
#[tokio::test]
async fn test_short_inputs_rejected() {
    let aes = AesGcmEncryption::new();
    aes.generate_secret_key().await;

    for len in 0..12usize {
        let result = aes.decrypt(&vec![0u8; len], &EncryptionMetadata::Aes).await;
        assert!(
            matches!(result, Err(EncryptionError::TruncatedCiphertext { .. })),
            "length {} was not rejected as truncated",
            len
        );
    }
}

/// Test 6: a fresh instance rejects everything until keyed
#[tokio::test]
async fn test_unkeyed_instance_rejects_operations() {
    let aes = AesGcmEncryption::new();

    assert!(matches!(
        aes.encrypt(b"data").await,
        Err(EncryptionError::NoSecretKey)
    ));
    assert!(matches!(
        aes.decrypt(b"0123456789abcdef", &EncryptionMetadata::Aes)
            .await,
        Err(EncryptionError::NoSecretKey)
    ));
    assert!(matches!(
        aes.export_secret_key().await,
        Err(EncryptionError::NoSecretKey)
    ));

    aes.generate_secret_key().await;
    assert!(aes.export_secret_key().await.is_ok());
}

/// Test 7: ciphertext length is nonce + plaintext + tag
#[tokio::test]
async fn test_hello_world_scenario() {
    let aes = AesGcmEncryption::new();
    aes.generate_secret_key().await;

    let ciphertext = aes.encrypt(b"hello world").await.unwrap();
    assert_eq!(ciphertext.len(), 12 + b"hello world".len() + 16);

    let plaintext = aes
        .decrypt(&ciphertext, &EncryptionMetadata::Aes)
        .await
        .unwrap();
    assert_eq!(plaintext, b"hello world");
}

/// Metadata of the symmetric cipher is the bare type tag
#[tokio::test]
async fn test_metadata_shape() {
    let aes = AesGcmEncryption::new();
    assert_eq!(aes.metadata().await.unwrap(), EncryptionMetadata::Aes);
    assert_eq!(aes.encryption_type(), "aes-gcm");
}
