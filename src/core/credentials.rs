//! Credential orchestration.
//!
//! Ties the configuration cache and the envelope engine together: resolves
//! the master key for an environment, encrypts named variables in place in
//! their backing file, and decrypts them on demand. Encryption is a one-way
//! transition for the stored value; decryption never mutates storage.

use std::path::Path;

use tracing::{debug, info};

use crate::core::config::ConfigStore;
use crate::core::constants::{
    DEFAULT_ENCRYPTED_LENGTH_THRESHOLD, ENCRYPTED_LENGTH_THRESHOLD_KEY, PROPERTIES_ALIAS,
};
use crate::core::{crypto, envfile, keys};
use crate::error::Result;

/// Value-length threshold above which a variable is treated as already
/// encrypted.
///
/// Envelope text is always longer than a typical plaintext credential, so
/// length is used as the idempotence heuristic. Tunable through the optional
/// properties source or a process environment variable; defaults otherwise.
fn encrypted_length_threshold(store: &ConfigStore) -> usize {
    store
        .get_typed(PROPERTIES_ALIAS, ENCRYPTED_LENGTH_THRESHOLD_KEY)
        .unwrap_or(DEFAULT_ENCRYPTED_LENGTH_THRESHOLD)
}

fn is_already_encrypted(store: &ConfigStore, value: &str) -> bool {
    value.len() > encrypted_length_threshold(store)
}

/// Encrypt the variable `name` in `file_path`, in place.
///
/// Reads the current raw value from the cached source for `alias`. A value
/// already longer than the encrypted-length threshold is left untouched
/// (logged no-op), which makes repeated encryption runs safe. Otherwise the
/// master key named `key_name` is resolved, the value is sealed into an
/// envelope, the single matching `name=` line is rewritten, and the alias is
/// reloaded so the cache observes the stored envelope.
///
/// # Errors
///
/// Propagates configuration, key-resolution, crypto, and I/O failures.
pub fn encrypt_variable(
    store: &ConfigStore,
    file_path: &Path,
    alias: &str,
    key_name: &str,
    name: &str,
) -> Result<()> {
    let current = store.get(alias, name)?;

    if is_already_encrypted(store, &current) {
        info!(
            variable = name,
            "skipping encryption: value is already encrypted; provide a plaintext value to re-encrypt"
        );
        return Ok(());
    }

    let master = keys::resolve_master_key(store, key_name)?;
    let envelope = crypto::encrypt(&master, &current)?;
    envfile::set_var(file_path, name, &envelope)?;
    store.reload(alias)?;

    info!(variable = name, "variable encrypted");
    Ok(())
}

/// Encrypt several variables, one at a time.
///
/// Aborts on the first failure; variables earlier in the list stay
/// encrypted, later ones are left untouched.
///
/// # Errors
///
/// Propagates the first failure from [`encrypt_variable`].
pub fn encrypt_variables(
    store: &ConfigStore,
    file_path: &Path,
    alias: &str,
    key_name: &str,
    names: &[&str],
) -> Result<()> {
    for name in names {
        encrypt_variable(store, file_path, alias, key_name, name)?;
    }
    Ok(())
}

/// Decrypt the variable `name` and return its plaintext.
///
/// Resolves the master key, reads the stored envelope from the cached source
/// for `alias`, and opens it. Storage is never mutated.
///
/// # Errors
///
/// Propagates configuration, key-resolution, and crypto failures; a wrong
/// key or tampered envelope surfaces as `CryptoError::AuthenticationFailed`.
pub fn decrypt_variable(
    store: &ConfigStore,
    alias: &str,
    key_name: &str,
    name: &str,
) -> Result<String> {
    let master = keys::resolve_master_key(store, key_name)?;
    let envelope = store.get(alias, name)?;
    debug!(variable = name, "decrypting variable");
    crypto::decrypt(&master, &envelope)
}

/// Decrypt several variables under one resolved master key.
///
/// Results come back in input order. An empty name list returns an empty
/// vec without error.
///
/// # Errors
///
/// Propagates the first failure; nothing is retried.
pub fn decrypt_variables(
    store: &ConfigStore,
    alias: &str,
    key_name: &str,
    names: &[&str],
) -> Result<Vec<String>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let master = keys::resolve_master_key(store, key_name)?;
    names
        .iter()
        .map(|name| {
            let envelope = store.get(alias, name)?;
            crypto::decrypt(&master, &envelope)
        })
        .collect()
}
