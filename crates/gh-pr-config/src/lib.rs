//! Configuration and file management for the PR diff review toolkit
//!
//! This crate provides:
//! - File path utilities for config, cache and storage directories
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig) and theme tokens
//! - Best-effort JSON key-value storage
//! - File logger bootstrap

pub mod app_config;
pub mod config_file;
pub mod logger;
pub mod paths;
pub mod storage;
pub mod theme;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use app_config::{AppConfig, PanelConfig};
pub use config_file::{load_config_file, CONFIG_FILE_NAME};
pub use paths::{cache_dir, config_dir, storage_dir};
pub use storage::JsonStorage;
pub use theme::ThemeTokens;
