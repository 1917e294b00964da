use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "default_line_numbers")]
    pub show_line_numbers: bool,

    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
}

fn default_line_numbers() -> bool {
    true
}

fn default_auto_save() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            show_line_numbers: default_line_numbers(),
            auto_save: default_auto_save(),
        }
    }
}

impl AppSettings {
    /// Load settings from `path`, falling back to defaults.
    ///
    /// A missing file is created with the defaults; an unreadable or corrupt
    /// one is left alone and reported.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings at {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    log::warn!("Could not write default settings: {}", e);
                }
                default
            }
            Err(e) => {
                log::warn!("Failed to read settings at {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Overwrite the settings file at `path` wholesale.
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("tabpad");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.show_line_numbers);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings {
            theme: Theme::Dark,
            show_line_numbers: false,
            auto_save: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_field_names_on_disk() {
        let json = serde_json::to_string(&AppSettings::default()).unwrap();
        assert!(json.contains("\"theme\":\"light\""));
        assert!(json.contains("\"show_line_numbers\":true"));
        assert!(json.contains("\"auto_save\":true"));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"theme": "dark"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.show_line_numbers);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_missing_file_gives_defaults_and_writes_them() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        // Left untouched for the user to inspect
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_non_utf8_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let bytes = b"{\"theme\": \"dark\xff\"}".to_vec();
        fs::write(&path, &bytes).unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            theme: Theme::Dark,
            show_line_numbers: false,
            auto_save: false,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_theme_is_dark() {
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
    }
}
