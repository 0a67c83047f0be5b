//! Utility module for flexframe
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{ChromeConfig, Config, GeneralConfig};
pub use error::{ChromeError, IntoChromeError, Result};

/// Load the configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. System configuration file
/// 3. User configuration file
/// 4. Environment variables
pub fn load_config() -> Result<Config> {
    Config::load()
}
