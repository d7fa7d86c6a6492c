//! Keygen command.
//!
//! Generates a fresh master key for an environment and stores it in the base
//! environment file. Write-once: an existing key is left untouched.

use std::path::Path;

use crate::cli::output;
use crate::core::crypto::MasterKey;
use crate::core::environment::Environment;
use crate::core::keys;
use crate::error::Result;

/// Generate and bootstrap a master key for `env`.
pub fn execute(env: Environment, dir: &Path) -> Result<()> {
    let key_name = crate::cli::secret_key_name(env)?;
    let base_path = Environment::Base.file_path(dir);

    let master = MasterKey::generate();
    let written = keys::bootstrap_master_key(&base_path, key_name, &master.to_base64())?;

    if written {
        output::success(&format!(
            "master key {} saved to {}",
            output::key(key_name),
            output::path(&base_path.display().to_string())
        ));
        output::hint(&format!(
            "encrypt credentials with: envseal encrypt --env {} <NAME>...",
            env.alias()
        ));
    } else {
        output::warn(&format!(
            "master key {} already exists; remove it explicitly before replacing",
            output::key(key_name)
        ));
    }

    Ok(())
}
