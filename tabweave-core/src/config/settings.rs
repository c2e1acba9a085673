//! Layout settings and their TOML persistence
//!
//! Settings live in `~/.config/tabweave/layout.toml`. A missing file is
//! not an error; every field falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keybindings::KeybindingSettings;
use crate::trace_operation_debug;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput, span_names};

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "tabweave";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "layout.toml";

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O error reading or writing the settings file
    #[error("I/O error on {path}: {message}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// The file is not valid settings TOML
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// No platform configuration directory could be determined
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// Result type for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Logging settings, convertible into a [`TracingConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level for the layout engine
    pub level: TracingLevel,
    /// Custom filter directive (overrides `level`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Emit span timings
    pub timing: bool,
    /// Where log output goes
    pub output: TracingOutput,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::Info,
            filter: None,
            timing: false,
            output: TracingOutput::Stderr,
        }
    }
}

impl LoggingSettings {
    /// Builds the tracing configuration described by these settings.
    #[must_use]
    pub fn to_tracing_config(&self) -> TracingConfig {
        let config = TracingConfig::new()
            .with_level(self.level)
            .with_output(self.output.clone())
            .with_timing(self.timing);
        match &self.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

impl From<&LoggingSettings> for TracingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        settings.to_tracing_config()
    }
}

/// Settings for one window's split layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Opaque window identifier propagated to every created widget
    pub window_id: String,
    /// Logging configuration
    pub logging: LoggingSettings,
    /// Keybinding overrides for layout actions
    pub keybindings: KeybindingSettings,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            window_id: "main".to_string(),
            logging: LoggingSettings::default(),
            keybindings: KeybindingSettings::default(),
        }
    }
}

impl LayoutSettings {
    /// Returns the default settings file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the platform has no config directory.
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Renders settings as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Loads settings from `path`, returning defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _span =
            trace_operation_debug!(span_names::CONFIG_LOAD, path = %path.display()).entered();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml_str(&text)?;

        let unknown = settings.keybindings.unknown_actions();
        if !unknown.is_empty() {
            tracing::warn!(actions = ?unknown, "Ignoring keybindings for unknown actions");
        }
        tracing::debug!(path = %path.display(), window_id = %settings.window_id, "Loaded settings");
        Ok(settings)
    }

    /// Saves settings to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let _span =
            trace_operation_debug!(span_names::CONFIG_SAVE, path = %path.display()).entered();

        let text = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, text).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
