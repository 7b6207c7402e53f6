//! Session configuration persisted between runs.
//!
//! Replaces the usual global-settings singleton with an explicit value: the
//! shim restores a previous session by passing a [`SessionConfig`] into
//! [`crate::session::AnnotationSession::from_config`] and persists one from
//! [`crate::session::AnnotationSession::to_config`] at shutdown.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOX_THICKNESS, DEFAULT_MIN_BOX_SIZE};

/// Session settings restored at startup and persisted at shutdown.
///
/// Every field is defaulted individually so a missing, partial, or invalid
/// settings file can never prevent a session from starting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Folder the image list is built from
    #[serde(default)]
    pub images_folder: String,

    /// Folder label files are written to
    #[serde(default)]
    pub output_folder: String,

    /// Class names in registry order
    #[serde(default)]
    pub classes: Vec<String>,

    /// Box outline thickness for the presentation layer
    #[serde(default = "default_box_thickness")]
    pub box_thickness: u32,

    /// Minimum box edge in pixels for new boxes
    #[serde(default = "default_min_box_size")]
    pub min_box_size: u32,

    /// Image index the operator was on
    #[serde(default)]
    pub current_image_index: usize,
}

fn default_box_thickness() -> u32 {
    DEFAULT_BOX_THICKNESS
}

fn default_min_box_size() -> u32 {
    DEFAULT_MIN_BOX_SIZE
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            images_folder: String::new(),
            output_folder: String::new(),
            classes: Vec::new(),
            box_thickness: default_box_thickness(),
            min_box_size: default_min_box_size(),
            current_image_index: 0,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default settings filename.
    pub fn default_filename() -> &'static str {
        "yolabel-settings.json"
    }

    /// Default settings file path for auto-load/save.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Prefer the XDG config directory, fall back to home
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("yolabel").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("yolabel")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load the configuration from the default path.
    ///
    /// Returns `None` if the file doesn't exist or can't be read or parsed;
    /// startup proceeds with defaults either way.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No settings file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse settings file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read settings file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save the configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json().map_err(ConfigError::Parse)?;
        std::fs::write(&path, json)?;
        log::info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing or serialization error
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error when reading or writing the settings file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
