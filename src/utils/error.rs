//! Error types for flexframe
//!
//! This module defines the error type shared by the window chrome
//! controller, the platform backends and the configuration loader.
//! Library code returns `ChromeError`; the demo program wraps it in anyhow.

use thiserror::Error;

/// Main error type for flexframe
#[derive(Error, Debug)]
pub enum ChromeError {
    /// A relative size outside the open interval (0, 1)
    #[error("Invalid relative size {0}: must lie strictly between 0 and 1")]
    InvalidRelativeSize(f64),

    /// An aspect ratio with a negative or non-finite component
    #[error("Invalid aspect ratio {width}:{height}: components must be non-negative")]
    InvalidAspectRatio { width: f64, height: f64 },

    /// Malformed input that could not be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The native window behind the controller no longer exists
    #[error("Window has been destroyed")]
    WindowDestroyed,

    /// A native platform call failed
    #[error("Platform error: {0}")]
    Platform(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),
}

/// Convenience type alias for Results in flexframe
pub type Result<T> = std::result::Result<T, ChromeError>;

/// Extension trait for converting other errors to ChromeError
pub trait IntoChromeError<T> {
    /// Convert this error into a platform error with the given context
    fn platform_err(self, context: &str) -> Result<T>;

    /// Convert this error into a configuration error with the given context
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoChromeError<T> for std::result::Result<T, E> {
    fn platform_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Platform(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Config(format!("{}: {}", context, e)))
    }
}
