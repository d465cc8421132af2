use std::{fs::File, path::Path, path::PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::FakescanError;

const CONFIG_DIR_NAME: &str = "fakescan";
const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 720.,
            height: 820.,
        }
    }
}

impl From<WindowSize> for egui::Vec2 {
    fn from(value: WindowSize) -> Self {
        egui::Vec2::new(value.width, value.height)
    }
}

impl From<egui::Vec2> for WindowSize {
    fn from(value: egui::Vec2) -> Self {
        Self {
            width: value.x,
            height: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    /// Last email used to sign in. Passwords are never stored.
    pub email: Option<String>,
    pub window_size: WindowSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            email: None,
            window_size: WindowSize::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        Some(
            dirs::config_dir()?
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        )
    }

    /// Loads the user's config file. A broken file is logged and ignored.
    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::config_path()?;
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Option<Self>, FakescanError> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file =
            File::open(config_path).map_err(|e| FakescanError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| FakescanError::ConfigParseError { source: e })?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), FakescanError> {
        let config_path = Self::config_path().ok_or(FakescanError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), FakescanError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FakescanError::ConfigIOError { source: e })?;
        }

        let file = File::create(config_path)
            .map_err(|e| FakescanError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| FakescanError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = AppConfig {
            server_url: "https://detector.example.com".to_string(),
            email: Some("ana@example.com".to_string()),
            window_size: WindowSize {
                width: 1024.,
                height: 768.,
            },
        };
        config.save_to(&config_path).unwrap();

        let loaded = AppConfig::load_from(&config_path).unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = AppConfig::load_from(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        write!(file, r#"{{"email":"ana@example.com"}}"#).unwrap();

        let loaded = AppConfig::load_from(&config_path).unwrap().unwrap();
        assert_eq!(loaded.server_url, DEFAULT_SERVER_URL);
        assert_eq!(loaded.email.as_deref(), Some("ana@example.com"));
        assert_eq!(loaded.window_size, WindowSize::default());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "{not json").unwrap();

        assert!(matches!(
            AppConfig::load_from(&config_path),
            Err(FakescanError::ConfigParseError { .. })
        ));
    }
}
