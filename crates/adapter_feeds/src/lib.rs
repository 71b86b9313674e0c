//! # adapter_feeds: Market Data Adapters (A: Adapter Layer)
//!
//! Supplies the pricing core with the market data it needs for one
//! valuation: spot, closing-price history, listed option chains and the
//! risk-free rate.
//!
//! - [`MarketDataProvider`]: async provider trait
//! - [`SyntheticProvider`]: seeded GBM simulator over a fixed instrument universe
//! - [`CsvProvider`]: per-symbol CSV files on disk
//! - [`OptionChain`]: expirations and strikes per side
//! - [`HistoryPeriod`]: look-back windows (`1mo` .. `5y`)
//!
//! Providers neither retry nor cache; every [`FeedError`] propagates to the
//! caller unchanged.

#![deny(missing_docs)]

pub mod chain;
pub mod error;
pub mod period;
pub mod provider;

pub use chain::{ExpirySlice, OptionChain};
pub use error::FeedError;
pub use period::HistoryPeriod;
pub use provider::{
    CsvProvider, InstrumentSpec, MarketDataProvider, SyntheticProvider, DEFAULT_RISK_FREE_RATE,
};
