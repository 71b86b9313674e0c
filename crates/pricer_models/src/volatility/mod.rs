//! Historical volatility estimation.
//!
//! - [`PriceSeries`]: chronological closes, NaN/`None` for missing
//! - [`estimate_annualized_volatility`]: annualised close-to-close volatility
//! - [`HistoricalVolatility`]: estimator bound to a sampling frequency

mod historical;
mod series;

pub use historical::{estimate_annualized_volatility, HistoricalVolatility};
pub use series::{PriceSeries, TRADING_DAYS_PER_YEAR};
