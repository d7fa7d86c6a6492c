//! Envelope encryption for configuration values.
//!
//! Every value is encrypted under a key derived from the environment's
//! master key with Argon2id and a fresh random salt, then sealed with
//! AES-256-GCM under a fresh random nonce. The result is a self-contained
//! envelope, `salt ‖ nonce ‖ ciphertext+tag`, base64-encoded for storage as
//! a configuration value. Decryption re-derives the same key from the salt
//! embedded in the envelope; KDF parameters are fixed engine-wide constants
//! and are not stored in the envelope.

use aes_gcm::{
    aead::{consts::U16, Aead, KeyInit},
    aes::Aes256,
    AesGcm, Key, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::core::constants::{
    ARGON2_ITERATIONS, ARGON2_MEMORY_KIB, ARGON2_PARALLELISM, KEY_LEN, NONCE_LEN, SALT_LEN,
};
use crate::error::{CryptoError, KeyError, Result};

/// AES-256-GCM with a 16-byte nonce, matching the envelope layout.
type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Long-lived symmetric secret for one named environment.
///
/// Stored base64-encoded in the base environment file; the in-memory copy is
/// zeroized on drop.
pub struct MasterKey(Zeroizing<[u8; KEY_LEN]>);

impl MasterKey {
    /// Generate a fresh random master key.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut *bytes);
        Self(bytes)
    }

    /// Decode a master key from its base64 storage form.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidKey` if the input is not valid base64 or
    /// does not decode to exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let mut decoded = BASE64
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidKey)?;
        if decoded.len() != KEY_LEN {
            decoded.zeroize();
            return Err(KeyError::InvalidKey.into());
        }

        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self(bytes))
    }

    /// Base64 storage form of this key.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes())
    }

    fn bytes(&self) -> &[u8] {
        &*self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("MasterKey(..)")
    }
}

/// Derive a per-envelope key from the master key and a salt.
///
/// Deterministic for a given (master, salt) pair; decryption relies on this
/// to recompute the key from the salt carried in the envelope. The returned
/// buffer is zeroized on drop, covering error paths in the callers.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if the KDF rejects its parameters
/// or fails to produce output.
pub fn derive_key(master: &MasterKey, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut derived = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(master.bytes(), salt, &mut *derived)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(derived)
}

/// Encrypt a UTF-8 string under the master key.
///
/// Generates a fresh salt and nonce per call, so two encryptions of the same
/// plaintext produce different envelopes.
///
/// # Errors
///
/// Returns `CryptoError::EmptyPlaintext` for an empty input, or a
/// `CryptoError` if key derivation or the cipher fails.
pub fn encrypt(master: &MasterKey, plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
        return Err(CryptoError::EmptyPlaintext.into());
    }

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let derived = derive_key(master, &salt)?;
    let cipher = EnvelopeCipher::new(Key::<EnvelopeCipher>::from_slice(&*derived));
    let ciphertext = cipher
        .encrypt(Nonce::<U16>::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CryptoError::Cipher)?;

    let mut envelope = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(envelope))
}

/// Decrypt an envelope produced by [`encrypt`] back to its plaintext.
///
/// # Errors
///
/// Returns `CryptoError::MalformedEnvelope` for bad base64, an undersized
/// envelope, or non-UTF-8 plaintext, and `CryptoError::AuthenticationFailed`
/// when the authentication tag does not verify (wrong key, corrupted
/// ciphertext, or tampering).
pub fn decrypt(master: &MasterKey, envelope: &str) -> Result<String> {
    if envelope.is_empty() {
        return Err(CryptoError::MalformedEnvelope("empty input".to_string()).into());
    }

    let combined = BASE64
        .decode(envelope.trim())
        .map_err(|_| CryptoError::MalformedEnvelope("invalid base64".to_string()))?;
    if combined.len() < SALT_LEN + NONCE_LEN {
        return Err(CryptoError::MalformedEnvelope(format!(
            "{} bytes is shorter than salt and nonce",
            combined.len()
        ))
        .into());
    }

    let (salt, rest) = combined.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let derived = derive_key(master, salt)?;
    let cipher = EnvelopeCipher::new(Key::<EnvelopeCipher>::from_slice(&*derived));
    let plaintext = cipher
        .decrypt(Nonce::<U16>::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    match String::from_utf8(plaintext) {
        Ok(text) => Ok(text),
        Err(e) => {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            Err(CryptoError::MalformedEnvelope("plaintext is not UTF-8".to_string()).into())
        }
    }
}
