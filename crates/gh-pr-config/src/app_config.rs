//! Application configuration
//!
//! Configuration loaded from `.gh-pr-review.toml`.

use crate::theme::ThemeTokens;
use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from `.gh-pr-review.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// GitHub host (e.g. "github.com" or a GitHub Enterprise host)
    #[serde(default = "default_host")]
    pub host: String,

    /// Value sent as `X-GitHub-Api-Version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Diff display mode ("split" or "unified")
    #[serde(default = "default_display_mode")]
    pub display_mode: String,

    /// Number of lines revealed per "load more" step
    #[serde(default = "default_expand_step")]
    pub expand_step: u32,

    /// Maximum number of memoized hunk row sets
    #[serde(default = "default_row_cache_size")]
    pub row_cache_size: usize,

    /// Log level for the file logger
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File explorer panel sizing (percent of the container width)
    #[serde(default)]
    pub file_panel: PanelConfig,

    /// Theme tokens
    #[serde(default)]
    pub theme: ThemeTokens,
}

/// Initial width and bounds of a resizable panel, in percent.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub initial: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            initial: 25.0,
            min: 15.0,
            max: 60.0,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_api_version() -> String {
    "2022-11-28".to_string()
}

fn default_display_mode() -> String {
    "split".to_string()
}

fn default_expand_step() -> u32 {
    20
}

fn default_row_cache_size() -> usize {
    512
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_version: default_api_version(),
            display_mode: default_display_mode(),
            expand_step: default_expand_step(),
            row_cache_size: default_row_cache_size(),
            log_level: default_log_level(),
            file_panel: PanelConfig::default(),
            theme: ThemeTokens::default(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, then the config
    /// directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse a config from TOML text; missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    /// Whether the configured host is public GitHub
    pub fn is_github_com(&self) -> bool {
        self.host == DEFAULT_HOST
    }
}
