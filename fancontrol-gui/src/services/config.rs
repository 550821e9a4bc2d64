//! GUI preferences
//!
//! Stored as TOML under the user's config directory, separate from the UCI
//! config the controller reads.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing the preferences file
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// GUI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GuiConfig {
    /// UI preferences
    pub preferences: Preferences,
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Sidebar expanded by default
    pub sidebar_expanded: bool,

    /// Status polling interval in milliseconds
    pub poll_interval_ms: u64,

    /// UCI config directory when not given on the command line
    pub config_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sidebar_expanded: true,
            poll_interval_ms: 3000,
            config_dir: None,
        }
    }
}

impl GuiConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        let config_dir = directories::ProjectDirs::from("", "", "fancontrol")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".config/fancontrol"));

        config_dir.join("gui.toml")
    }

    /// Load preferences, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load preferences from a specific path; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            log::info!("No preferences file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(config)
    }

    /// Save preferences to the default path
    pub fn save(&self) -> Result<(), PreferencesError> {
        self.save_to(&Self::config_path())
    }

    /// Save preferences to a specific path
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)?;

        log::debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}
