//! Constants used throughout envseal.
//!
//! Centralizes envelope layout, KDF parameters, and well-known names.

/// Salt length in bytes at the front of every envelope.
pub const SALT_LEN: usize = 32;

/// Nonce (IV) length in bytes, following the salt.
pub const NONCE_LEN: usize = 16;

/// AES-GCM authentication tag length in bytes (128-bit tag).
pub const TAG_LEN: usize = 16;

/// Symmetric key length in bytes (AES-256); also the Argon2 output length.
pub const KEY_LEN: usize = 32;

/// Argon2id iteration count (time cost).
pub const ARGON2_ITERATIONS: u32 = 3;

/// Argon2id memory cost in KiB (64 MiB).
pub const ARGON2_MEMORY_KIB: u32 = 65536;

/// Argon2id lane count (parallelism).
pub const ARGON2_PARALLELISM: u32 = 4;

/// Default value-length threshold above which a variable is treated as
/// already encrypted. Envelopes are always longer than typical plaintext
/// credentials, so length is used as the idempotence heuristic.
pub const DEFAULT_ENCRYPTED_LENGTH_THRESHOLD: usize = 90;

/// Configuration key that overrides the encrypted-length threshold.
pub const ENCRYPTED_LENGTH_THRESHOLD_KEY: &str = "ENCRYPTED_LENGTH_THRESHOLD";

/// Alias of the base configuration source holding master keys.
pub const BASE_ALIAS: &str = "base";

/// Alias of the optional properties source holding tunables.
pub const PROPERTIES_ALIAS: &str = "properties";

/// Default directory holding environment files.
pub const ENV_DIR: &str = "envs";
