//! User settings
//!
//! Settings are stored as JSON in the system's standard configuration
//! directory. A missing file means defaults.

use crate::progress::TrackingPolicy;
use crate::surface::IconAction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or storing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to determine config directory location
    #[error("Failed to determine config directory location")]
    ConfigDirectoryNotFound,

    /// Failed to create the config directory
    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the settings file
    #[error("Failed to read settings file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the settings file
    #[error("Failed to write settings file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to deserialize the settings file
    #[error("Failed to deserialize settings file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What clicking the toolbar icon opens
    pub icon_action: IconAction,
    pub tracking: TrackingPolicy,
    /// Language code preferred for display names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            icon_action: IconAction::Popup,
            tracking: TrackingPolicy::default(),
            preferred_language: None,
        }
    }
}

impl Settings {
    /// Path of the settings file in the platform config directory
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let proj_dirs = directories::ProjectDirs::from("de", "westhoffswelt", "seasonsync")
            .ok_or(SettingsError::ConfigDirectoryNotFound)?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from the platform config directory
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Loads settings from `path`, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| SettingsError::DeserializationFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Writes settings to `path`, creating parent directories as needed
    pub fn store_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| SettingsError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("season_sync_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/season_sync/settings.json"))
            .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.icon_action, IconAction::Popup);
        assert!(settings.tracking.season_granularity);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("settings_partial.json");
        fs::write(&path, r#"{"icon_action": "panel"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.icon_action, IconAction::Panel);
        assert!(settings.tracking.season_granularity);
        assert_eq!(settings.preferred_language, None);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_store_then_load() {
        let dir = temp_path("settings_store");
        let path = dir.join("settings.json");

        let settings = Settings {
            icon_action: IconAction::Panel,
            tracking: TrackingPolicy {
                season_granularity: false,
            },
            preferred_language: Some("deu".to_string()),
        };
        settings.store_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_path("settings_bad.json");
        fs::write(&path, r#"{"icon_action": "sidebar"}"#).unwrap();

        let result = Settings::load_from(&path);
        assert!(matches!(
            result,
            Err(SettingsError::DeserializationFailed { .. })
        ));

        fs::remove_file(&path).ok();
    }
}
