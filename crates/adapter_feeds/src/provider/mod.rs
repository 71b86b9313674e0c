//! Market data providers.
//!
//! A provider is the only component that performs I/O on behalf of the
//! pricing core. It supplies spot, history, listed chains and the risk-free
//! rate; it never prices anything itself.

mod csv_file;
mod synthetic;

pub use csv_file::CsvProvider;
pub use synthetic::{InstrumentSpec, SyntheticProvider};

use async_trait::async_trait;
use pricer_models::volatility::PriceSeries;

use crate::chain::OptionChain;
use crate::error::FeedError;
use crate::period::HistoryPeriod;

/// Rate returned when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

/// Source of market data for one valuation.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Latest price of the underlying.
    async fn spot_price(&self, symbol: &str) -> Result<f64, FeedError>;

    /// Closing prices over `period`, oldest first.
    async fn historical_prices(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, FeedError>;

    /// Listed expirations and strikes.
    async fn option_chain(&self, symbol: &str) -> Result<OptionChain, FeedError>;

    /// Annualised continuously-compounded risk-free rate.
    async fn risk_free_rate(&self) -> Result<f64, FeedError>;
}

/// Canonical ticker: trimmed and upper-cased.
///
/// Rejects symbols that cannot be safely used as a lookup key or file stem.
pub(crate) fn validate_symbol(symbol: &str) -> Result<String, FeedError> {
    let trimmed = symbol.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '^' | '='))
        && !trimmed.contains("..");
    if valid {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(FeedError::InvalidSymbol(symbol.to_string()))
    }
}
