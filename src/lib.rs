//! Envseal - per-environment credential encryption for dotenv-style files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keygen        # Generate and bootstrap a master key
//! │   ├── encrypt       # Encrypt variables in an environment file
//! │   ├── decrypt       # Decrypt variables and print plaintext
//! │   ├── status        # Show environment files and loaded sources
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Load-once configuration cache
//!     ├── crypto        # Envelope encryption (Argon2id + AES-256-GCM)
//!     ├── envfile       # KEY=VALUE file parsing and in-place rewrite
//!     ├── environment   # Named environments and their file layout
//!     ├── keys          # Master key generation, bootstrap, resolution
//!     └── credentials   # Encrypt/decrypt orchestration
//! ```
//!
//! # Features
//!
//! - Self-contained envelopes: salt ‖ nonce ‖ ciphertext+tag, base64-encoded
//! - Memory-hard key derivation per envelope (Argon2id)
//! - Write-once master keys stored in a base environment file
//! - Thread-safe, load-once configuration cache with env-var overrides
//! - In-place .env rewrites that preserve untouched lines

pub mod cli;
pub mod core;
pub mod error;
