//! Error types for market data providers.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Market data provider errors.
///
/// Providers never retry or cache; every error reaches the caller unchanged.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The source has nothing for the request (unknown symbol, missing file, empty history).
    #[error("No data: {0}")]
    NoData(String),

    /// Symbol cannot be used to address the source.
    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),

    /// Reading the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing or field decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record decoded but its content is unusable.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider data rejected while building a pricing input.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl FeedError {
    /// Create a no data error
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
