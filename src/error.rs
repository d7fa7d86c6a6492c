//! Error types for envseal operations.
//!
//! Errors are grouped by subsystem (config cache, crypto engine, master keys)
//! and wrapped in a single top-level [`Error`] so callers can match on the
//! category or the specific failure.

use thiserror::Error;

/// Errors from the configuration cache.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment file not found: {0}")]
    FileNotFound(String),

    #[error("configuration alias not loaded: {0} (call load first)")]
    NotLoaded(String),

    #[error("key '{key}' not found or empty in configuration '{alias}'")]
    MissingKey { alias: String, key: String },

    #[error("failed to read environment file: {0}")]
    ReadFile(#[source] std::io::Error),
}

/// Errors from the envelope crypto engine.
///
/// The authentication-tag mismatch is kept distinct from malformed input so
/// diagnostics can tell a wrong key or tampered ciphertext apart from garbage
/// input. Messages never carry key material or plaintext.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("plaintext must not be empty")]
    EmptyPlaintext,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("authentication failed: wrong key, corrupted ciphertext, or tampering")]
    AuthenticationFailed,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("cipher operation failed")]
    Cipher,
}

/// Errors from master key resolution and bootstrap.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("master key '{key}' could not be resolved: {reason}")]
    Unresolved { key: String, reason: String },

    #[error("master key is not valid base64 or has the wrong length")]
    InvalidKey,
}

/// Top-level error type for all envseal operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
