//! Error handling for the wick CLI.
//!
//! A small hierarchy using `thiserror`: `CliError` is the top-level type
//! every command returns, `ConfigError` covers config loading and
//! validation with actionable hints. The binary boundary converts to
//! `miette::Report` for rendered diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (invalid syntax, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors from the serve core (bind failures, startup build failures)
    #[error(transparent)]
    Serve(#[from] wick_serve::ServeError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file has invalid JSON syntax
    #[error("Invalid JSON in config file: {0}\n\nHint: Use a JSON validator to check syntax")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to a miette Report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    miette::miette!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_invalid_value_has_hint() {
        let err = ConfigError::InvalidValue {
            field: "copy".to_string(),
            value: "nocolon".to_string(),
            hint: "Copy pairs are written FROM:TO".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'copy'"));
        assert!(msg.contains("nocolon"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn cli_error_from_config_error() {
        let err: CliError = ConfigError::InvalidValue {
            field: "port".to_string(),
            value: "x".to_string(),
            hint: "Use a number".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn cli_error_from_serve_error_is_transparent() {
        let serve = wick_serve::ServeError::Build("bundler crashed".to_string());
        let err: CliError = serve.into();
        assert_eq!(err.to_string(), "build failed: bundler crashed");
    }

    #[test]
    fn file_not_found_names_path() {
        let err = CliError::FileNotFound(PathBuf::from("/project/.env"));
        assert!(err.to_string().contains("/project/.env"));
    }
}
