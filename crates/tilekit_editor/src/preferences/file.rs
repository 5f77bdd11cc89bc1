//! Preferences file save/load operations

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl EditorPreferences {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("net", "tilekit", "tilekit_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the preferences file path
    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load preferences from the config directory, returning defaults if unavailable
    pub fn load() -> Self {
        match Self::preferences_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                bevy::log::warn!("{}. Using default preferences.", PreferencesError::NoConfigDir);
                Self::default()
            }
        }
    }

    /// Load preferences from a file, falling back to defaults (saved to the same file) on error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(prefs) => prefs,
            Err(e) => {
                bevy::log::warn!("Could not load preferences: {}. Using defaults.", e);
                Self {
                    source: Some(path.to_path_buf()),
                    ..Self::default()
                }
            }
        }
    }

    /// Load preferences from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        let mut prefs: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        prefs.source = Some(path.to_path_buf());
        Ok(prefs)
    }

    /// Save preferences back to the file they were loaded from, or the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?,
        };
        self.save_to(&path)
    }

    /// Save preferences to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        bevy::log::info!("Saved preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("tilekit-prefs-{}", uuid::Uuid::new_v4()));
        let path = dir.join(PREFERENCES_FILE);

        let mut preferences = EditorPreferences::load_from(&path).unwrap();
        preferences.show_coordinates = false;
        preferences.history_limit = 7;
        preferences.save().unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(loaded, preferences);
        assert!(!loaded.show_coordinates);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("tilekit-missing-{}.json", uuid::Uuid::new_v4()));
        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(loaded.recent_boards, Vec::new());
        assert_eq!(loaded.history_limit, EditorPreferences::default().history_limit);
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("tilekit-corrupt-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            EditorPreferences::load_from(&path),
            Err(PreferencesError::Json(_))
        ));

        let fallback = EditorPreferences::load_or_default(&path);
        assert!(fallback.show_coordinates);
        assert_eq!(fallback.source.as_deref(), Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
    }
}
