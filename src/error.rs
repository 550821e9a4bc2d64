//! Unified error types for fancontrol
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration store operations
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error reading or writing a device status file
    #[error("Status error: {0}")]
    Status(#[from] StatusError),

    /// Fan control is switched off in the settings section
    #[error("Fan control is disabled in {config}.{section}")]
    Disabled { config: String, section: String },

    /// Could not install the shutdown handler
    #[error("Failed to set signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Temperature outside 0-100
    #[error("Invalid temperature: {0}°C (must be 0-100)")]
    InvalidTemperature(i32),

    /// PWM level outside 0-255
    #[error("Invalid fan speed: {0} (must be 0-255)")]
    InvalidSpeed(i32),

    /// A curve token that is not two integers
    #[error("Invalid curve point '{0}'. Expected TEMP:PWM (e.g., 45:36)")]
    InvalidToken(String),

    /// Curve has fewer than two points
    #[error("Fan curve must have at least 2 points (got {0})")]
    TooFewPoints(usize),

    /// Two points share the same temperature
    #[error("Duplicate curve temperature: {0}°C")]
    DuplicateTemperature(i32),

    /// Point index outside the curve
    #[error("No curve point at index {index} (curve has {len} points)")]
    PointIndex { index: usize, len: usize },
}

/// Errors from configuration store parsing and persistence
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse a UCI file
    #[error("Failed to parse {file} line {line}: {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// Named section does not exist
    #[error("Missing configuration section: {config}.{section}")]
    MissingSection { config: String, section: String },

    /// Config was not loaded before use
    #[error("Configuration '{0}' is not loaded")]
    NotLoaded(String),

    /// IO error while committing
    #[error("Failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from status file reads and fan writes
#[derive(Error, Debug)]
pub enum StatusError {
    /// Path was not configured
    #[error("No path configured for {0}")]
    PathUnset(&'static str),

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not an integer
    #[error("Unexpected content in {path}: '{content}'")]
    Malformed { path: String, content: String },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
