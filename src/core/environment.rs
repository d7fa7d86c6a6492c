//! Named environments and their file layout.
//!
//! Each environment owns one dotenv-style file under the environment
//! directory and, except for the base environment, one master key stored in
//! the base file. The base file holds only master keys and shared settings.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// A named environment with a well-known file and master key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Base environment holding master keys (`envs/.env`).
    Base,
    /// Development (`envs/.env.dev`).
    Dev,
    /// User acceptance testing (`envs/.env.uat`).
    Uat,
    /// Production (`envs/.env.prod`).
    Prod,
}

impl Environment {
    /// Alias the environment's file is cached under.
    pub fn alias(self) -> &'static str {
        match self {
            Environment::Base => "base",
            Environment::Dev => "dev",
            Environment::Uat => "uat",
            Environment::Prod => "prod",
        }
    }

    /// File name inside the environment directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Environment::Base => ".env",
            Environment::Dev => ".env.dev",
            Environment::Uat => ".env.uat",
            Environment::Prod => ".env.prod",
        }
    }

    /// Name of the master key for this environment in the base file.
    ///
    /// The base environment stores keys for the others and has none of its
    /// own.
    pub fn secret_key_name(self) -> Option<&'static str> {
        match self {
            Environment::Base => None,
            Environment::Dev => Some("DEV_SECRET_KEY"),
            Environment::Uat => Some("UAT_SECRET_KEY"),
            Environment::Prod => Some("PROD_SECRET_KEY"),
        }
    }

    /// Full path of the environment's file under `dir`.
    pub fn file_path(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// All environments, base first.
    pub fn all() -> [Environment; 4] {
        [
            Environment::Base,
            Environment::Dev,
            Environment::Uat,
            Environment::Prod,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layout() {
        let dir = Path::new("envs");
        assert_eq!(Environment::Base.file_path(dir), dir.join(".env"));
        assert_eq!(Environment::Uat.file_path(dir), dir.join(".env.uat"));
    }

    #[test]
    fn test_secret_key_names() {
        assert_eq!(Environment::Base.secret_key_name(), None);
        assert_eq!(Environment::Uat.secret_key_name(), Some("UAT_SECRET_KEY"));
        assert_eq!(Environment::Prod.secret_key_name(), Some("PROD_SECRET_KEY"));
    }
}
