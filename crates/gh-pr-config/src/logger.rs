//! File-based logging using simplelog
//!
//! Libraries in this workspace only emit through the `log` facade; a host
//! application calls [`init`] once to route those records into a timestamped
//! file in the cache directory (or a directory of its choosing).

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Parse a textual level, defaulting to `Info` for unknown values.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Timestamped log file name inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("gh-pr-review-{}.log", timestamp))
}

/// Initialize file logging in the cache directory.
///
/// `RUST_LOG` overrides `level` when set. Returns the log file path.
pub fn init(level: &str) -> Result<PathBuf> {
    let dir = crate::paths::cache_dir()?;
    init_in(&dir, level)
}

/// Initialize file logging in `dir`. Fails if a global logger is already set.
pub fn init_in(dir: &Path, level: &str) -> Result<PathBuf> {
    let log_file = log_file_path(dir);

    let level = std::env::var("RUST_LOG")
        .map(|v| parse_level(&v))
        .unwrap_or_else(|_| parse_level(level));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/tmp/logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("gh-pr-review-"));
        assert!(name.ends_with(".log"));
        assert!(path.starts_with("/tmp/logs"));
    }
}
