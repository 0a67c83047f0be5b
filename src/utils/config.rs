//! Configuration management for flexframe
//!
//! This module handles loading the initial chrome settings for a window
//! from config files and environment variables.

use crate::utils::error::{ChromeError, IntoChromeError, Result};
use crate::window::{AspectRatio, CapabilitySet, RelativeSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial window chrome settings
    pub chrome: ChromeConfig,

    /// General settings
    pub general: GeneralConfig,
}

/// Initial chrome settings for a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Absolute outer width assigned before any relative sizing
    pub width: Option<f64>,

    /// Absolute outer height assigned before any relative sizing
    pub height: Option<f64>,

    /// Locked aspect ratio as "W:H"
    pub aspect_ratio: Option<String>,

    /// Nominal size as a fraction of the monitor
    pub relative_size: Option<f64>,

    /// Minimum size as a fraction of the monitor
    pub relative_min_size: Option<f64>,

    /// Maximum size as a fraction of the monitor
    pub relative_max_size: Option<f64>,

    /// Enabled frame buttons
    pub enabled_buttons: CapabilitySet,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ChromeConfig {
    /// The configured aspect ratio, parsed
    pub fn parsed_aspect_ratio(&self) -> Result<Option<AspectRatio>> {
        self.aspect_ratio
            .as_deref()
            .map(str::parse::<AspectRatio>)
            .transpose()
    }

    /// Check every value the controller would reject
    pub fn validate(&self) -> Result<()> {
        self.parsed_aspect_ratio()?;
        RelativeSize::from_option(self.relative_size)?;
        RelativeSize::from_option(self.relative_min_size)?;
        RelativeSize::from_option(self.relative_max_size)?;

        for dimension in [self.width, self.height].into_iter().flatten() {
            if !dimension.is_finite() || dimension <= 0.0 {
                return Err(ChromeError::Config(format!(
                    "Window dimensions must be positive, got {}",
                    dimension
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/flexframe/config.toml on Linux)
    /// 3. User config file (~/.config/flexframe/config.toml on Linux)
    /// 4. Environment variables (FLEXFRAME_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config = Self::read_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config = Self::read_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load and validate a single config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| ChromeError::Config("Cannot determine user config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).config_err("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).config_err("Failed to serialize config")?;
        std::fs::write(path, toml).config_err("Failed to write config file")?;

        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).config_err("Failed to read config file")?;
        toml::from_str(&contents).config_err("Failed to parse config file")
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(ratio) = std::env::var("FLEXFRAME_ASPECT_RATIO") {
            self.chrome.aspect_ratio = if ratio.trim().is_empty() { None } else { Some(ratio) };
        }

        let fractions = [
            ("FLEXFRAME_RELATIVE_SIZE", &mut self.chrome.relative_size),
            ("FLEXFRAME_RELATIVE_MIN_SIZE", &mut self.chrome.relative_min_size),
            ("FLEXFRAME_RELATIVE_MAX_SIZE", &mut self.chrome.relative_max_size),
        ];
        for (name, slot) in fractions {
            if let Ok(value) = std::env::var(name) {
                *slot = Some(
                    value
                        .parse()
                        .map_err(|_| ChromeError::Config(format!("Invalid {}", name)))?,
                );
            }
        }

        if let Ok(buttons) = std::env::var("FLEXFRAME_ENABLED_BUTTONS") {
            self.chrome.enabled_buttons = buttons.parse()?;
        }

        if let Ok(log_level) = std::env::var("FLEXFRAME_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.chrome.validate()?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(ChromeError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/flexframe/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("flexframe").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from("/Library/Application Support/flexframe/config.toml"));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flexframe").join("config.toml"))
    }
}
