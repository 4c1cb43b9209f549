//! Configuration file support.

use crate::domain::DEFAULT_BAD_WORDS;
use crate::web::{SESSION_DAYS_RANGE, Settings, Site};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Listen address used when neither the CLI nor the config file sets one.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory holding `<site>.db`
    pub data_dir: Option<PathBuf>,

    /// Listen address for `serve`
    pub addr: Option<String>,

    /// News items on the news home page
    pub news_per_page: Option<usize>,

    /// Words rejected in comments
    pub bad_words: Option<Vec<String>>,

    /// Mark session cookies `Secure`
    pub secure_cookies: Option<bool>,

    /// Session lifetime after the last request, in days
    pub session_days: Option<i64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/yasite/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yasite")
            .join("config.toml")
    }

    /// Directory for database files.
    ///
    /// Precedence order:
    /// 1. Config file `data_dir` setting
    /// 2. Platform data directory (`~/.local/share/yasite`)
    /// 3. Current working directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("yasite"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Resolve the database for `site`, with CLI argument taking precedence.
    pub fn db_path(&self, site: Site, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .unwrap_or_else(|| self.data_dir().join(format!("{site}.db")))
    }

    /// Resolve the listen address, with CLI argument taking precedence.
    pub fn addr(&self, cli_addr: Option<&str>) -> String {
        cli_addr
            .map(str::to_string)
            .or_else(|| self.addr.clone())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
    }

    /// Runtime settings for the web layer, defaults filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if `session_days` is outside [`SESSION_DAYS_RANGE`].
    pub fn settings(&self) -> Result<Settings> {
        let defaults = Settings::default();
        if let Some(days) = self.session_days
            && !SESSION_DAYS_RANGE.contains(&days)
        {
            bail!(
                "invalid session_days {days}: must be between {} and {}",
                SESSION_DAYS_RANGE.start(),
                SESSION_DAYS_RANGE.end()
            );
        }

        Ok(Settings {
            news_per_page: self.news_per_page.unwrap_or(defaults.news_per_page),
            bad_words: self
                .bad_words
                .clone()
                .unwrap_or_else(|| DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect()),
            secure_cookies: self.secure_cookies.unwrap_or(defaults.secure_cookies),
            session_days: self.session_days.unwrap_or(defaults.session_days),
        })
    }
}
