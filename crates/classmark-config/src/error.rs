//! Error types for configuration loading

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// E-CONFIG-001: The settings file cannot be read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// E-CONFIG-002: The settings are not valid JSON for this schema
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "E-CONFIG-001",
            ConfigError::Json(_) => "E-CONFIG-002",
        }
    }
}
