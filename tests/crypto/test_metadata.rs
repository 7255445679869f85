// Copyright (c) 2025 Ledgermail
// SPDX-License-Identifier: BUSL-1.1
// Tests for the metadata wire format

use ledgermail_sdk::{EncryptionError, EncryptionMetadata};

#[test]
fn test_wire_shapes() {
    assert_eq!(
        EncryptionMetadata::Aes.encode().unwrap(),
        r#"{"type":"aes-gcm"}"#
    );

    let ecdh = EncryptionMetadata::EcdhAes {
        sender_public_key: "02sender".to_string(),
        receiver_public_key: "03receiver".to_string(),
    };
    assert_eq!(
        ecdh.encode().unwrap(),
        r#"{"type":"ecdh-aes","senderPublicKey":"02sender","receiverPublicKey":"03receiver"}"#
    );
}

#[test]
fn test_round_trip_is_field_order_independent() {
    // Receiver-first field order must decode identically
    let reordered =
        r#"{"receiverPublicKey":"03receiver","senderPublicKey":"02sender","type":"ecdh-aes"}"#;

    let decoded = EncryptionMetadata::decode(reordered).unwrap();
    assert_eq!(
        decoded,
        EncryptionMetadata::EcdhAes {
            sender_public_key: "02sender".to_string(),
            receiver_public_key: "03receiver".to_string(),
        }
    );
}

#[test]
fn test_malformed_inputs() {
    for input in [
        "",
        "{",
        "plain text",
        r#"{"type":42}"#,
        r#"{"notype":"aes-gcm"}"#,
        r#"{"type":"unknown-cipher"}"#,
        r#"{"type":"ecdh-aes"}"#,
    ] {
        let result = EncryptionMetadata::decode(input);
        assert!(
            matches!(result, Err(EncryptionError::MalformedMetadata { .. })),
            "input {:?} was not rejected as malformed",
            input
        );
    }
}
