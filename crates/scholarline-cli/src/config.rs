//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use scholarline_core::DEFAULT_USER_AGENT;
use scholarline_scholar::config::{DEFAULT_BASE_URL, DEFAULT_POLITENESS_DELAY};
use serde::Deserialize;

/// File-level configuration for scholarline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpSection,
    pub enrich: EnrichSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub base_url: String,
    pub user_agent: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EnrichSection {
    pub workers: usize,
    /// Pause after each detail fetch, in milliseconds
    pub delay_ms: u64,
}

impl Default for EnrichSection {
    fn default() -> Self {
        Self {
            workers: 4,
            delay_ms: DEFAULT_POLITENESS_DELAY.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./scholarline.toml (current directory)
    /// 2. ~/.config/scholarline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("scholarline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "scholarline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.enrich.delay_ms)
    }
}
