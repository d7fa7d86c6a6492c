//! Decrypt command.
//!
//! Decrypts named variables and prints them as KEY=value lines on stdout,
//! shell-eval friendly. The backing file is never mutated.

use std::path::Path;

use crate::core::config::ConfigStore;
use crate::core::constants::BASE_ALIAS;
use crate::core::credentials;
use crate::core::environment::Environment;
use crate::error::Result;

/// Decrypt `names` from the file for `env` and print the plaintext.
pub fn execute(env: Environment, dir: &Path, names: &[String]) -> Result<()> {
    let key_name = crate::cli::secret_key_name(env)?;

    let store = ConfigStore::global();
    store.load(BASE_ALIAS, Environment::Base.file_path(dir))?;
    store.load(env.alias(), env.file_path(dir))?;

    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let plaintexts = credentials::decrypt_variables(store, env.alias(), key_name, &names)?;

    for (name, plaintext) in names.iter().zip(plaintexts) {
        println!("{}={}", name, plaintext);
    }
    Ok(())
}
