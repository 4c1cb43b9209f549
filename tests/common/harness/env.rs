//! Isolated environment for running the binary.

// Allow dead code since only the CLI tests use the environment
#![allow(dead_code)]

use super::YasiteCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a database and an empty config home.
///
/// Cleaned up on drop. Commands built from it never see the developer's
/// own config file.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Database file passed through `--db`.
    pub fn db_path(&self) -> PathBuf {
        self.root().join("site.db")
    }

    /// Directory used as `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Writes `yasite/config.toml` under the config home.
    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("yasite");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// A command with isolated config and `--db` pointing into this env.
    pub fn cmd(&self) -> YasiteCommand {
        YasiteCommand::new()
            .env("XDG_CONFIG_HOME", &self.config_home())
            .env("HOME", self.root())
            .db(&self.db_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
