//! Load-once configuration cache.
//!
//! Maps a logical alias (e.g. "base", "uat") to an immutable snapshot of a
//! flat `KEY=VALUE` file. Lookups consult the process environment first, so
//! values can be overridden without touching the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::core::envfile;
use crate::error::{ConfigError, Result};

/// One loaded configuration source: an immutable-after-load snapshot of a
/// single environment file, tagged by its alias.
#[derive(Debug)]
pub struct ConfigSource {
    alias: String,
    path: PathBuf,
    values: HashMap<String, String>,
}

impl ConfigSource {
    /// Read the file at `path` fully into memory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` if the path does not exist, or
    /// `ConfigError::ReadFile` on a read failure.
    fn load(alias: &str, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let values = envfile::parse(&contents);

        debug!(alias, path = %path.display(), entries = values.len(), "source loaded");

        Ok(Self {
            alias: alias.to_string(),
            path: path.to_path_buf(),
            values,
        })
    }

    /// Alias this source was loaded under.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Path this source was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value for `key` in the loaded mapping, if present.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Thread-safe registry of loaded configuration sources.
///
/// The registry is an explicit, injectable object so tests can build isolated
/// instances; the process-wide default lives behind [`ConfigStore::global`]
/// and is intended for the application's composition root only.
#[derive(Debug, Default)]
pub struct ConfigStore {
    sources: DashMap<String, Arc<ConfigSource>>,
}

/// A process environment variable overrides the file value, mirroring how
/// CI pipelines inject per-run settings.
fn env_override(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl ConfigStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default registry.
    pub fn global() -> &'static ConfigStore {
        static GLOBAL: OnceLock<ConfigStore> = OnceLock::new();
        GLOBAL.get_or_init(ConfigStore::new)
    }

    /// Load the file at `path` under `alias`.
    ///
    /// Idempotent: if the alias is already cached this is a no-op, and when
    /// multiple callers race to load the same alias for the first time
    /// exactly one load wins (compute-if-absent). Loads for different
    /// aliases do not serialize against each other.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` or `ConfigError::ReadFile`.
    pub fn load(&self, alias: &str, path: impl AsRef<Path>) -> Result<()> {
        match self.sources.entry(alias.to_string()) {
            Entry::Occupied(_) => {
                debug!(alias, "alias already loaded, skipping");
                Ok(())
            }
            Entry::Vacant(slot) => {
                let source = ConfigSource::load(alias, path.as_ref())?;
                slot.insert(Arc::new(source));
                info!(alias, "configuration loaded");
                Ok(())
            }
        }
    }

    /// Handle to the loaded source for `alias`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotLoaded` if the alias was never loaded.
    pub fn source(&self, alias: &str) -> Result<Arc<ConfigSource>> {
        self.sources
            .get(alias)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ConfigError::NotLoaded(alias.to_string()).into())
    }

    /// Value for `key` under `alias`, with the process environment taking
    /// precedence over the cached file value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotLoaded` if the alias was never loaded, or
    /// `ConfigError::MissingKey` if the key is absent or empty in both the
    /// override and the cache.
    pub fn get(&self, alias: &str, key: &str) -> Result<String> {
        if let Some(value) = env_override(key) {
            debug!(alias, key, "using process environment override");
            return Ok(value);
        }

        let source = self.source(alias)?;
        match source.value(key) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => {
                warn!(alias, key, "key not found or empty");
                Err(ConfigError::MissingKey {
                    alias: alias.to_string(),
                    key: key.to_string(),
                }
                .into())
            }
        }
    }

    /// Like [`ConfigStore::get`], but returns `default` when the key is
    /// missing or empty instead of failing.
    ///
    /// # Errors
    ///
    /// Still returns `ConfigError::NotLoaded` for an unknown alias.
    pub fn get_or_default(&self, alias: &str, key: &str, default: &str) -> Result<String> {
        if let Some(value) = env_override(key) {
            return Ok(value);
        }

        let source = self.source(alias)?;
        match source.value(key) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => {
                debug!(alias, key, default, "key missing, using default");
                Ok(default.to_string())
            }
        }
    }

    /// Parsed value for `key` under `alias`.
    ///
    /// Returns `None` for an unloaded alias, a missing key, or a parse
    /// failure, so callers can supply their own defaults.
    pub fn get_typed<T: FromStr>(&self, alias: &str, key: &str) -> Option<T> {
        let raw = env_override(key).or_else(|| {
            self.sources
                .get(alias)
                .and_then(|entry| entry.value().value(key).map(str::to_string))
        })?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(alias, key, value = %raw, "value failed to parse, ignoring");
                None
            }
        }
    }

    /// Atomically discard and re-read the source for `alias` from its
    /// original path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotLoaded` if the alias was never loaded, plus
    /// the usual load failures.
    pub fn reload(&self, alias: &str) -> Result<()> {
        match self.sources.entry(alias.to_string()) {
            Entry::Occupied(mut entry) => {
                let path = entry.get().path.clone();
                let source = ConfigSource::load(alias, &path)?;
                entry.insert(Arc::new(source));
                info!(alias, "configuration reloaded");
                Ok(())
            }
            Entry::Vacant(_) => Err(ConfigError::NotLoaded(alias.to_string()).into()),
        }
    }

    /// Whether `alias` has been loaded.
    pub fn is_loaded(&self, alias: &str) -> bool {
        self.sources.contains_key(alias)
    }

    /// Aliases currently loaded, in no particular order.
    pub fn loaded_aliases(&self) -> Vec<String> {
        self.sources.iter().map(|e| e.key().clone()).collect()
    }
}
