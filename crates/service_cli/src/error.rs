//! CLI error types.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_risk::payoff::PositionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `pricer` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pricing or analytics operation failed.
    #[error("{0}")]
    Pricing(#[from] PricingError),

    /// A position file holds an invalid leg.
    #[error("{0}")]
    Position(#[from] PositionError),

    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Command-line arguments are inconsistent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Process exit code: 2 for rejected input, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Pricing(err) if err.is_validation() => 2,
            CliError::Config(_)
            | CliError::Position(_)
            | CliError::FileNotFound(_)
            | CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
