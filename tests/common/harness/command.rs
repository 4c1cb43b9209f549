//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use std::ffi::OsString;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `yasite` binary.
pub struct YasiteCommand {
    args: Vec<String>,
    envs: Vec<(String, OsString)>,
}

impl YasiteCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Sets the `--db` option.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &Path) -> Self {
        self.envs.push((key.to_string(), value.as_os_str().to_owned()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("yasite").expect("Failed to find yasite binary");
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for `create-user <site> <username> --password <password>`.
    pub fn create_user(self, site: &str, username: &str, password: &str) -> Self {
        self.args(["create-user", site, username, "--password", password])
    }

    /// Configures for `add-news --title <title> --text <text>`.
    pub fn add_news(self, title: &str, text: &str) -> Self {
        self.args(["add-news", "--title", title, "--text", text])
    }

    /// Adds `--date` to an `add-news` command.
    pub fn with_date(self, date: &str) -> Self {
        self.args(["--date", date])
    }
}

impl Default for YasiteCommand {
    fn default() -> Self {
        Self::new()
    }
}
