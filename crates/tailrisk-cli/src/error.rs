//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Price window with start after end.
    #[error("Invalid window: start {start} must be before end {end}")]
    InvalidWindow {
        /// First date
        start: String,
        /// Last date
        end: String,
    },

    /// A price file path without a usable file name.
    #[error("Cannot derive a symbol from {0}; pass --symbol")]
    MissingSymbol(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Price data could not be loaded.
    #[error("Data error: {0}")]
    Data(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tailrisk_config::ConfigError> for CliError {
    fn from(e: tailrisk_config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<tailrisk_traits::TraitError> for CliError {
    fn from(e: tailrisk_traits::TraitError) -> Self {
        CliError::Data(e.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
