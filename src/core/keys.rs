//! Master key bootstrap and resolution.
//!
//! Master keys are generated once, stored base64-encoded in the base
//! environment file, and resolved through the configuration cache for every
//! crypto operation. Bootstrap is write-once: an existing key is never
//! overwritten, since that would silently invalidate every value already
//! encrypted under it.

use std::path::Path;

use tracing::{info, warn};

use crate::core::config::ConfigStore;
use crate::core::constants::BASE_ALIAS;
use crate::core::crypto::MasterKey;
use crate::core::envfile;
use crate::error::{KeyError, Result};

/// Store `encoded` under `key_name` in the base environment file.
///
/// Ensures the file and its directory exist first. If the key already has a
/// non-empty value the call logs and returns `Ok(false)` without touching
/// the file, so bootstrap is safely repeatable.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created, read, or written.
pub fn bootstrap_master_key(base_path: &Path, key_name: &str, encoded: &str) -> Result<bool> {
    envfile::ensure_file(base_path)?;

    if envfile::has_value(base_path, key_name)? {
        warn!(
            key = key_name,
            "master key already exists; remove it explicitly before replacing"
        );
        return Ok(false);
    }

    envfile::set_var(base_path, key_name, encoded)?;
    info!(key = key_name, path = %base_path.display(), "master key saved");
    Ok(true)
}

/// Resolve the master key named `key_name` from the base configuration
/// source.
///
/// # Errors
///
/// Returns `KeyError::Unresolved` if the base source is not loaded or the
/// key is absent, and `KeyError::InvalidKey` if the stored value does not
/// decode to a 32-byte key.
pub fn resolve_master_key(store: &ConfigStore, key_name: &str) -> Result<MasterKey> {
    let encoded = store
        .get(BASE_ALIAS, key_name)
        .map_err(|e| KeyError::Unresolved {
            key: key_name.to_string(),
            reason: e.to_string(),
        })?;
    MasterKey::from_base64(&encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_bootstrap_creates_file_and_writes_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("envs").join(".env");
        let master = MasterKey::generate();

        let written = bootstrap_master_key(&path, "UAT_SECRET_KEY", &master.to_base64()).unwrap();
        assert!(written);
        assert!(envfile::has_value(&path, "UAT_SECRET_KEY").unwrap());
    }

    #[test]
    fn test_bootstrap_is_write_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let first = MasterKey::generate();
        let second = MasterKey::generate();

        assert!(bootstrap_master_key(&path, "UAT_SECRET_KEY", &first.to_base64()).unwrap());
        assert!(!bootstrap_master_key(&path, "UAT_SECRET_KEY", &second.to_base64()).unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        let values = envfile::parse(&contents);
        assert_eq!(values["UAT_SECRET_KEY"], first.to_base64());
    }

    #[test]
    fn test_resolve_master_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let master = MasterKey::generate();
        bootstrap_master_key(&path, "UAT_SECRET_KEY", &master.to_base64()).unwrap();

        let store = ConfigStore::new();
        store.load(BASE_ALIAS, &path).unwrap();

        let resolved = resolve_master_key(&store, "UAT_SECRET_KEY").unwrap();
        assert_eq!(resolved.to_base64(), master.to_base64());
    }

    #[test]
    fn test_resolve_without_base_source() {
        let store = ConfigStore::new();
        assert!(matches!(
            resolve_master_key(&store, "UAT_SECRET_KEY"),
            Err(Error::Key(KeyError::Unresolved { .. }))
        ));
    }

    #[test]
    fn test_resolve_undecodable_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        bootstrap_master_key(&path, "UAT_SECRET_KEY", "not-a-key").unwrap();

        let store = ConfigStore::new();
        store.load(BASE_ALIAS, &path).unwrap();

        assert!(matches!(
            resolve_master_key(&store, "UAT_SECRET_KEY"),
            Err(Error::Key(KeyError::InvalidKey))
        ));
    }
}
