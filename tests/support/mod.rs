//! Shared test support.

pub mod fixtures;

use std::path::PathBuf;

use envseal::core::crypto::MasterKey;
use envseal::core::keys;
use tempfile::TempDir;

/// An environment directory with a base file holding one master key and a
/// UAT file holding plaintext credentials.
pub struct EnvFixture {
    pub _dir: TempDir,
    pub base_path: PathBuf,
    pub uat_path: PathBuf,
    pub master: MasterKey,
}

impl EnvFixture {
    /// Build the fixture with the given UAT file contents.
    pub fn new(uat_contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let base_path = dir.path().join(".env");
        let uat_path = dir.path().join(".env.uat");

        let master = MasterKey::generate();
        keys::bootstrap_master_key(&base_path, fixtures::UAT_KEY_NAME, &master.to_base64())
            .unwrap();
        std::fs::write(&uat_path, uat_contents).unwrap();

        Self {
            _dir: dir,
            base_path,
            uat_path,
            master,
        }
    }
}
