//! Best-effort JSON key-value storage
//!
//! Each key is stored as `<percent-encoded key>.json` inside the storage
//! directory, so distinct keys never share a file. Reads
//! fall back to the caller's default and writes are dropped when the backend
//! is unavailable or an I/O error occurs; failures are only logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Key-value store of JSON blobs
#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: Option<PathBuf>,
}

impl JsonStorage {
    /// Storage backed by the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Storage without a backend; reads return defaults, writes are no-ops
    pub fn unavailable() -> Self {
        Self { dir: None }
    }

    /// Storage in the platform data directory, or unavailable if it cannot be
    /// determined
    pub fn open_default() -> Self {
        match crate::paths::storage_dir() {
            Ok(dir) => Self::new(dir),
            Err(e) => {
                log::warn!("Storage unavailable: {:#}", e);
                Self::unavailable()
            }
        }
    }

    /// Whether a backing directory is configured
    pub fn is_available(&self) -> bool {
        self.dir.is_some()
    }

    /// Read the value stored under `key`, or `default` if it is missing or
    /// unreadable
    pub fn read_value<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(path) = self.path_for(key) else {
            return default;
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read storage key '{}': {}", key, e);
                }
                return default;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring malformed storage key '{}': {}", key, e);
                default
            }
        }
    }

    /// Store `value` under `key`
    pub fn write_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(path) = self.path_for(key) else {
            return;
        };

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize storage key '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = write_file(&path, &json) {
            log::warn!("Failed to write storage key '{}': {}", key, e);
        }
    }

    /// Remove the value stored under `key`
    pub fn remove(&self, key: &str) {
        if let Some(path) = self.path_for(key) {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove storage key '{}': {}", key, e);
                }
            }
        }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", file_stem(key))))
    }
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Map a key onto a file stem without path separators. Injective.
fn file_stem(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct PanelState {
        width: f64,
        collapsed: Vec<String>,
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());

        let value = PanelState {
            width: 32.5,
            collapsed: vec!["src/lib.rs".to_string()],
        };
        storage.write_value("panel-state", &value);

        let read = storage.read_value(
            "panel-state",
            PanelState {
                width: 0.0,
                collapsed: vec![],
            },
        );
        assert_eq!(read, value);
    }

    #[test]
    fn test_round_trip_json_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());

        let value = serde_json::json!({"mode": "split", "sizes": [1, 2, 3], "flag": null});
        storage.write_value("view", &value);
        assert_eq!(storage.read_value("view", serde_json::Value::Null), value);
    }

    #[test]
    fn test_missing_key_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        assert_eq!(storage.read_value("missing", 7u32), 7);
    }

    #[test]
    fn test_unavailable_backend_returns_default() {
        let storage = JsonStorage::unavailable();
        assert!(!storage.is_available());

        storage.write_value("key", &"value");
        assert_eq!(storage.read_value("key", "fallback".to_string()), "fallback");
        storage.remove("key");
    }

    #[test]
    fn test_malformed_value_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let storage = JsonStorage::new(dir.path());
        assert_eq!(storage.read_value("broken", 3i64), 3);
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());

        storage.write_value("gone", &true);
        storage.remove("gone");
        assert!(!storage.read_value("gone", false));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("owner/repo#12"), "owner%2Frepo%2312");
        assert_eq!(file_stem("../escape"), "..%2Fescape");
        assert_eq!(file_stem("plain-key_1"), "plain-key_1");
    }

    #[test]
    fn test_similar_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());

        storage.write_value("owner/repo", &1u32);
        storage.write_value("owner_repo", &2u32);
        storage.write_value("owner%2Frepo", &3u32);

        assert_eq!(storage.read_value("owner/repo", 0u32), 1);
        assert_eq!(storage.read_value("owner_repo", 0u32), 2);
        assert_eq!(storage.read_value("owner%2Frepo", 0u32), 3);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }
}
