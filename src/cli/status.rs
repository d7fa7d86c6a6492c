//! Status command.
//!
//! Shows which environment files exist and which master keys are present in
//! the base file. Never prints key material.

use std::path::Path;

use serde_json::json;

use crate::cli::output;
use crate::core::envfile;
use crate::core::environment::Environment;
use crate::error::Result;

/// Show the environment file layout under `dir`.
pub fn execute(dir: &Path, json_output: bool) -> Result<()> {
    let base_path = Environment::Base.file_path(dir);

    let mut entries = Vec::new();
    for env in Environment::all() {
        let file_path = env.file_path(dir);
        let file_exists = file_path.exists();
        let key_present = match env.secret_key_name() {
            Some(key_name) if base_path.exists() => envfile::has_value(&base_path, key_name)?,
            _ => false,
        };
        entries.push((env, file_path, file_exists, key_present));
    }

    if json_output {
        let envs: Vec<_> = entries
            .iter()
            .map(|(env, file_path, file_exists, key_present)| {
                json!({
                    "environment": env.alias(),
                    "file": file_path.display().to_string(),
                    "file_exists": file_exists,
                    "master_key": env.secret_key_name(),
                    "master_key_present": key_present,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "environments": envs }))?);
        return Ok(());
    }

    output::header("Environments");
    for (env, file_path, file_exists, key_present) in entries {
        let file = if file_exists {
            output::path(&file_path.display().to_string())
        } else {
            format!("{} (missing)", file_path.display())
        };
        output::kv(env.alias(), file);
        if let Some(key_name) = env.secret_key_name() {
            let state = if key_present { "present" } else { "absent" };
            output::kv("  master key", format!("{} ({})", key_name, state));
        }
    }
    Ok(())
}
