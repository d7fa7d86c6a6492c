//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod output;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::core::environment::Environment;
use crate::error::Result;

/// Envseal - per-environment credential encryption for .env files.
#[derive(Parser)]
#[command(
    name = "envseal",
    about = "Encrypt credentials in per-environment .env files",
    version
)]
pub struct Cli {
    /// Directory holding the environment files
    #[arg(long, global = true, default_value = crate::core::constants::ENV_DIR)]
    pub dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a master key for an environment and store it in the base file
    Keygen {
        /// Environment the key belongs to
        #[arg(short, long, value_enum)]
        env: Environment,
    },

    /// Encrypt variables in an environment file, in place
    Encrypt {
        /// Environment whose file is rewritten
        #[arg(short, long, value_enum)]
        env: Environment,
        /// Variable names to encrypt
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Decrypt variables and print them as KEY=value lines
    Decrypt {
        /// Environment whose file is read
        #[arg(short, long, value_enum)]
        env: Environment,
        /// Variable names to decrypt
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show environment files and their master keys
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Master key name for an environment, rejecting `base`.
pub(crate) fn secret_key_name(env: Environment) -> Result<&'static str> {
    env.secret_key_name().ok_or_else(|| {
        crate::error::KeyError::Unresolved {
            key: env.alias().to_string(),
            reason: "the base environment has no master key of its own".to_string(),
        }
        .into()
    })
}

/// Dispatch a parsed command.
pub fn execute(command: Command, dir: &std::path::Path) -> Result<()> {
    match command {
        Command::Keygen { env } => keygen::execute(env, dir),
        Command::Encrypt { env, names } => encrypt::execute(env, dir, &names),
        Command::Decrypt { env, names } => decrypt::execute(env, dir, &names),
        Command::Status { json } => status::execute(dir, json),
        Command::Completions { shell } => completions::execute(shell),
    }
}
