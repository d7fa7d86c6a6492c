//! KEY=VALUE environment file operations.
//!
//! Parsing and in-place rewrites for dotenv-style files. Values are stored
//! raw: no quoting, no escaping. A key is matched by the literal prefix
//! `KEY=`, untouched lines are preserved verbatim and in order, and new keys
//! are appended at the end of the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;

/// Rewrites to a given file interleave a full read with a full write, so
/// concurrent writers targeting the same path must serialize. One lock per
/// canonical path.
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<DashMap<PathBuf, Arc<Mutex<()>>>> = OnceLock::new();
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    LOCKS
        .get_or_init(DashMap::new)
        .entry(canonical)
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Parse `KEY=VALUE` lines into a mapping.
///
/// Blank lines and `#` comments are skipped. The first `=` splits key from
/// value; later lines win on duplicate keys.
pub fn parse(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.to_string(), value.to_string());
        }
    }
    values
}

/// Set `key` to `value` in the file at `path`, rewriting in place.
///
/// Lines matching the literal prefix `key=` are replaced; every other line
/// is preserved verbatim. If no line matches, `key=value` is appended.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or written.
pub fn set_var(path: &Path, key: &str, value: &str) -> Result<()> {
    let lock = path_lock(path);
    let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let contents = std::fs::read_to_string(path)?;
    let prefix = format!("{}=", key);
    let mut replaced = false;

    let mut lines: Vec<String> = contents
        .lines()
        .map(|line| {
            if line.starts_with(&prefix) {
                replaced = true;
                format!("{}={}", key, value)
            } else {
                line.to_string()
            }
        })
        .collect();

    if !replaced {
        lines.push(format!("{}={}", key, value));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    std::fs::write(path, output)?;

    debug!(key, path = %path.display(), replaced, "environment variable written");
    Ok(())
}

/// Whether `key` has a non-empty value in the file at `path`.
///
/// Goes through the parsed mapping rather than scanning raw lines, so the
/// check and the parser agree on what counts as a value.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn has_value(path: &Path, key: &str) -> Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    let values = parse(&contents);
    Ok(values.get(key).is_some_and(|v| !v.is_empty()))
}

/// Create the file at `path` (and its parent directory) if missing.
///
/// # Errors
///
/// Returns an I/O error if directory or file creation fails.
pub fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        std::fs::File::create(path)?;
        debug!(path = %path.display(), "environment file created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let values = parse("# comment\n\nA=1\n  \nB=two=three\n");
        assert_eq!(values.len(), 2);
        assert_eq!(values["A"], "1");
        assert_eq!(values["B"], "two=three");
    }

    #[test]
    fn test_parse_keeps_raw_values() {
        // No quote stripping or escaping on this format.
        let values = parse("QUOTED=\"hello\"\n");
        assert_eq!(values["QUOTED"], "\"hello\"");
    }

    #[test]
    fn test_set_var_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".env", "# header\nA=1\nB=2\n");

        set_var(&path, "A", "updated").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "# header\nA=updated\nB=2\n");
    }

    #[test]
    fn test_set_var_appends_when_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".env", "A=1\n");

        set_var(&path, "NEW", "value").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "A=1\nNEW=value\n");
    }

    #[test]
    fn test_set_var_matches_literal_prefix_only() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".env", "KEY=1\nKEY_LONGER=2\n");

        set_var(&path, "KEY", "new").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "KEY=new\nKEY_LONGER=2\n");
    }

    #[test]
    fn test_has_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".env", "SET=x\nEMPTY=\n");

        assert!(has_value(&path, "SET").unwrap());
        assert!(!has_value(&path, "EMPTY").unwrap());
        assert!(!has_value(&path, "ABSENT").unwrap());
    }

    #[test]
    fn test_ensure_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".env");

        ensure_file(&path).unwrap();
        assert!(path.exists());

        // Repeat call leaves an existing file alone.
        std::fs::write(&path, "A=1\n").unwrap();
        ensure_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=1\n");
    }

    #[test]
    fn test_concurrent_writers_do_not_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".env", "SEED=0\n");

        let mut handles = Vec::new();
        for i in 0..8 {
            let path = path.clone();
            handles.push(std::thread::spawn(move || {
                set_var(&path, &format!("KEY_{}", i), "v").unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let values = parse(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(values.len(), 9);
        for i in 0..8 {
            assert_eq!(values[&format!("KEY_{}", i)], "v");
        }
    }
}
