//! CLI error type.
//!
//! Wraps the error of every layer the commands touch so that a command can
//! use `?` on pricing, provider, configuration and I/O calls alike.

use adapter_feeds::FeedError;
use pricer_core::types::{DateError, PricingError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `optval` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Pricing or volatility estimation failed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Market data provider failed
    #[error("Market data: {0}")]
    Feed(#[from] FeedError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration: {0}")]
    Config(#[from] ConfigError),

    /// Date argument could not be parsed
    #[error(transparent)]
    Date(#[from] DateError),

    /// I/O failure writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line argument rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file named on the command line does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_displayed_unchanged() {
        let err: CliError = PricingError::InsufficientData { got: 1, need: 2 }.into();
        assert_eq!(err.to_string(), "Insufficient data: got 1, need at least 2");
    }

    #[test]
    fn test_feed_error_prefixed() {
        let err: CliError = FeedError::no_data("unknown symbol 'ZZZZ'").into();
        assert_eq!(err.to_string(), "Market data: No data: unknown symbol 'ZZZZ'");
    }

    #[test]
    fn test_invalid_argument() {
        let err = CliError::InvalidArgument("Expiration date must be in the future".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: Expiration date must be in the future"
        );
    }
}
