//! Configuration, cache and storage directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-pr-review/`, `~/.cache/gh-pr-review/`, `~/.local/share/gh-pr-review/`
//! - macOS: `~/Library/Application Support/gh-pr-review/`, `~/Library/Caches/gh-pr-review/`
//! - Windows: `%APPDATA%\gh-pr-review\`, `%LOCALAPPDATA%\gh-pr-review\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "gh-pr-review";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory (log files live here)
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the directory backing [`crate::JsonStorage`]
pub fn storage_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_NAME).join("storage");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to app config file in the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
