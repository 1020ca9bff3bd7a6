//! Viewer preferences remembered between sessions.

use crate::rows::DisplayMode;
use gh_pr_config::JsonStorage;
use serde::{Deserialize, Serialize};

/// Storage key the preferences are kept under.
pub const PREFERENCES_KEY: &str = "diff-viewer-preferences";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPreferences {
    pub display_mode: Option<DisplayMode>,
    /// File explorer width in percent.
    pub file_panel_width: Option<f64>,
}

impl ViewerPreferences {
    /// Stored preferences, or none set when missing or unreadable.
    pub fn load(storage: &JsonStorage) -> Self {
        storage.read_value(PREFERENCES_KEY, Self::default())
    }

    pub fn save(&self, storage: &JsonStorage) {
        storage.write_value(PREFERENCES_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());

        let prefs = ViewerPreferences {
            display_mode: Some(DisplayMode::Unified),
            file_panel_width: Some(32.5),
        };
        prefs.save(&storage);

        assert_eq!(ViewerPreferences::load(&storage), prefs);
    }

    #[test]
    fn test_unavailable_storage_yields_defaults() {
        let storage = JsonStorage::unavailable();
        ViewerPreferences {
            display_mode: Some(DisplayMode::Split),
            file_panel_width: None,
        }
        .save(&storage);

        assert_eq!(ViewerPreferences::load(&storage), ViewerPreferences::default());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        storage.write_value(PREFERENCES_KEY, &serde_json::json!({ "display_mode": "unified" }));

        let prefs = ViewerPreferences::load(&storage);
        assert_eq!(prefs.display_mode, Some(DisplayMode::Unified));
        assert_eq!(prefs.file_panel_width, None);
    }
}
