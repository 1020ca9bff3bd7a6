//! Locating the review config file.

use std::io::ErrorKind;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = ".gh-pr-review.toml";

/// Config file locations in priority order: working directory, home
/// directory, then `config.toml` in the platform config directory.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CONFIG_FILE_NAME));
    }
    if let Ok(path) = crate::paths::app_config_path() {
        candidates.push(path);
    }
    candidates
}

/// The first readable file among `candidates`, with the path it came from.
///
/// Missing files are skipped quietly; other read errors are logged and skipped.
pub fn read_first(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates
        .iter()
        .find_map(|path| match std::fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("Loaded config from {}", path.display());
                Some((path.clone(), content))
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    log::warn!("Skipping unreadable config {}: {}", path.display(), e);
                }
                None
            }
        })
}

/// Content of the highest-priority config file, if any exists.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    read_first(&config_candidates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_working_directory_comes_first() {
        let candidates = config_candidates();
        assert_eq!(candidates[0], PathBuf::from(CONFIG_FILE_NAME));
        assert!(candidates.len() >= 2);
    }

    #[test]
    fn test_read_first_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "host = \"a\"").unwrap();
        std::fs::write(&second, "host = \"b\"").unwrap();

        let found = read_first(&[missing, first.clone(), second]);
        assert_eq!(found, Some((first, "host = \"a\"".to_string())));
    }

    #[test]
    fn test_read_first_without_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_first(&[dir.path().join("nope.toml")]), None);
        assert_eq!(read_first(&[]), None);
    }
}
