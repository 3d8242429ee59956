//! User settings
//!
//! Settings are stored as JSON in the user's config directory:
//! - Linux: ~/.config/portfolio-gallery/settings.json
//! - macOS: ~/Library/Application Support/portfolio-gallery/settings.json
//! - Windows: %APPDATA%\portfolio-gallery\settings.json
//!
//! Every field has a default, so a partial file is valid and a missing
//! file simply means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::gesture::GestureThresholds;

const APP_DIR: &str = "portfolio-gallery";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Root the image references of the content bundle are resolved against
    pub assets_dir: PathBuf,
    /// Delay before the filter bar slides in
    pub filter_reveal_delay_ms: u64,
    /// Number of grid columns
    pub grid_columns: usize,
    pub gestures: GestureThresholds,
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            filter_reveal_delay_ms: 2000,
            grid_columns: 3,
            gestures: GestureThresholds::default(),
            theme: ThemeChoice::Light,
        }
    }
}

impl Settings {
    /// Get the path where the settings file should be stored
    pub fn path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default() -> Self {
        match Self::path().and_then(|path| Self::load_from(&path)) {
            Ok(Some(settings)) => {
                log::info!("⚙️  Settings loaded");
                settings
            }
            Ok(None) => {
                log::info!("⚙️  No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("⚠️  {}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Read a settings file. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(settings.sanitized()))
    }

    /// Write the settings to the user config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        log::info!("💾 Settings saved to {}", path.display());
        Ok(())
    }

    /// Write the settings as pretty JSON, creating the directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Keep values the UI can work with
    fn sanitized(mut self) -> Self {
        self.grid_columns = self.grid_columns.clamp(1, 6);
        self
    }
}
