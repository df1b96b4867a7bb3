//! Client configuration
//!
//! Read from `~/.podtrack/rc`, one `key=value` per line:
//!
//! ```text
//! # podtrack rc
//! api.url=https://tracker.example.org
//! api.timeout=30s
//! data.location=./session.db
//! ```
//!
//! A relative `data.location` resolves against the rc file's directory.
//! `PODTRACK_API_URL` overrides `api.url`.

use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use log::warn;
use crate::utils::parse_duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const API_URL_ENV: &str = "PODTRACK_API_URL";
const CONFIG_DIR: &str = ".podtrack";
const CONFIG_FILE: &str = "rc";
const DEFAULT_DB_FILE: &str = "session.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Request timeout; `None` waits for the server indefinitely
    pub timeout: Option<Duration>,
    pub data_location: PathBuf,
}

impl Config {
    /// Home directory, preferring `HOME` so tests can redirect it
    pub fn home_dir() -> Result<PathBuf> {
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().ok_or_else(|| anyhow!("Failed to locate home directory")),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join(CONFIG_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Defaults rooted at the given config directory
    pub fn defaults(config_dir: &Path) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            data_location: config_dir.join(DEFAULT_DB_FILE),
        }
    }

    /// Load the rc file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config_dir = Self::config_dir()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            Self::parse(&content, &config_dir)
                .with_context(|| format!("Invalid config file: {}", config_path.display()))?
        } else {
            Self::defaults(&config_dir)
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Parse rc content; relative paths resolve against `config_dir`
    pub fn parse(content: &str, config_dir: &Path) -> Result<Self> {
        let mut config = Self::defaults(config_dir);

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(anyhow!("line {}: expected key=value, got '{}'", line_no + 1, line));
            };
            let value = value.trim();
            match key.trim() {
                "api.url" => config.api_url = value.to_string(),
                "api.timeout" => {
                    let secs = parse_duration(value)
                        .with_context(|| format!("line {}: invalid api.timeout", line_no + 1))?;
                    config.timeout = Some(Duration::from_secs(secs as u64));
                }
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() {
                        config_dir.join(path)
                    } else {
                        path
                    };
                }
                other => warn!("Ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }
}
