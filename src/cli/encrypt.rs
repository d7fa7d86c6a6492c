//! Encrypt command.
//!
//! Encrypts named variables in an environment file, in place. Values that
//! already look encrypted are skipped, so the command is safe to re-run.

use std::path::Path;

use crate::cli::output;
use crate::core::config::ConfigStore;
use crate::core::constants::BASE_ALIAS;
use crate::core::credentials;
use crate::core::environment::Environment;
use crate::error::Result;

/// Encrypt `names` in the file for `env`.
pub fn execute(env: Environment, dir: &Path, names: &[String]) -> Result<()> {
    let key_name = crate::cli::secret_key_name(env)?;
    let file_path = env.file_path(dir);

    let store = ConfigStore::global();
    store.load(BASE_ALIAS, Environment::Base.file_path(dir))?;
    store.load(env.alias(), &file_path)?;

    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    credentials::encrypt_variables(store, &file_path, env.alias(), key_name, &names)?;

    output::success(&format!(
        "{} variable(s) encrypted in {}",
        names.len(),
        output::path(&file_path.display().to_string())
    ));
    Ok(())
}
