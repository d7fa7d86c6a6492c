//! Tests for the envelope crypto engine.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use envseal::core::crypto::{decrypt, derive_key, encrypt, MasterKey};
use envseal::error::{CryptoError, Error};
use proptest::prelude::*;

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let master = MasterKey::generate();

    let plaintext = "super secret password 123!";
    let envelope = encrypt(&master, plaintext).unwrap();

    // Envelope is opaque base64, never the plaintext.
    assert!(BASE64.decode(&envelope).is_ok());
    assert!(!envelope.contains(plaintext));

    let decrypted = decrypt(&master, &envelope).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_unicode_roundtrip() {
    let master = MasterKey::generate();
    let plaintext = "pässwörd-ñ-日本語";
    let envelope = encrypt(&master, plaintext).unwrap();
    assert_eq!(decrypt(&master, &envelope).unwrap(), plaintext);
}

#[test]
fn test_every_ciphertext_byte_is_authenticated() {
    let master = MasterKey::generate();
    let envelope = encrypt(&master, "alice").unwrap();
    let bytes = BASE64.decode(&envelope).unwrap();

    // Flip each byte of the ciphertext+tag region in turn; every flip must
    // surface as an authentication failure, never a success or a panic.
    for idx in (32 + 16)..bytes.len() {
        let mut tampered = bytes.clone();
        tampered[idx] ^= 0x01;
        let result = decrypt(&master, &BASE64.encode(&tampered));
        assert!(
            matches!(result, Err(Error::Crypto(CryptoError::AuthenticationFailed))),
            "flip at byte {} did not fail authentication",
            idx
        );
    }
}

#[test]
fn test_salt_tamper_changes_derived_key() {
    let master = MasterKey::generate();
    let envelope = encrypt(&master, "alice").unwrap();
    let mut bytes = BASE64.decode(&envelope).unwrap();

    // A different salt re-derives a different key, so the tag check fails.
    bytes[0] ^= 0x01;
    let result = decrypt(&master, &BASE64.encode(&bytes));
    assert!(matches!(
        result,
        Err(Error::Crypto(CryptoError::AuthenticationFailed))
    ));
}

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let master = MasterKey::generate();
    let other = MasterKey::generate();

    let envelope = encrypt(&master, "secret").unwrap();
    assert!(matches!(
        decrypt(&other, &envelope),
        Err(Error::Crypto(CryptoError::AuthenticationFailed))
    ));
}

#[test]
fn test_derivation_deterministic_encryption_not() {
    let master = MasterKey::generate();

    let a = encrypt(&master, "same").unwrap();
    let b = encrypt(&master, "same").unwrap();
    assert_ne!(a, b);

    let salt = [42u8; 32];
    assert_eq!(
        *derive_key(&master, &salt).unwrap(),
        *derive_key(&master, &salt).unwrap()
    );
}

proptest! {
    // The KDF is memory-hard by design, so keep the case count low.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_roundtrip_any_plaintext(plaintext in "[ -~]{1,64}") {
        let master = MasterKey::generate();
        let envelope = encrypt(&master, &plaintext).unwrap();
        prop_assert_eq!(decrypt(&master, &envelope).unwrap(), plaintext);
    }
}
