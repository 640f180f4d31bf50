//! notifctl configuration
//!
//! Loaded from `~/.notifctl/config.toml` (or `--config`). A missing file
//! means defaults; a malformed one is an error. Command-line flags and the
//! environment win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifctlConfig {
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    /// Log filter used when RUST_LOG is unset (e.g. "info", "notifications_db=debug")
    pub log_level: Option<String>,
    /// Run pending migrations before every command
    pub run_migrations: bool,
}

impl NotifctlConfig {
    /// Default config file path: ~/.notifctl/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".notifctl/config.toml")
    }

    /// Load from `path`, or the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?} (invalid TOML)", path))
    }

    /// Pick the database URL: explicit flag or DATABASE_URL first, then the file.
    pub fn resolve_database_url(&self, from_cli: Option<String>) -> Result<String> {
        from_cli
            .or_else(|| self.database_url.clone())
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or database_url in ~/.notifctl/config.toml")
    }
}
