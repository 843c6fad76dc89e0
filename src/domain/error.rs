//! Domain error types

use thiserror::Error;

/// Error when a recipe request violates its preconditions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Meal request text must not be empty")]
    EmptyRequestText,

    #[error("Party size must be at least 1")]
    ZeroPartySize,

    #[error("Budget must be a non-negative amount, got {0}")]
    InvalidBudget(f64),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
