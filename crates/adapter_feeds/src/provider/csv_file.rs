//! File-backed provider reading per-symbol CSV files.
//!
//! Layout under `data_dir`:
//!
//! - `<SYMBOL>.csv` with header `date,close`; an empty `close` is a missing
//!   observation
//! - `<SYMBOL>_options.csv` with header `expiration,type,strike`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pricer_core::types::Date;
use pricer_models::instruments::OptionType;
use pricer_models::volatility::{PriceSeries, TRADING_DAYS_PER_YEAR};
use serde::Deserialize;
use tracing::{debug, info};

use super::{validate_symbol, MarketDataProvider, DEFAULT_RISK_FREE_RATE};
use crate::chain::OptionChain;
use crate::error::FeedError;
use crate::period::HistoryPeriod;

#[derive(Debug, Deserialize)]
struct HistoryRow {
    date: String,
    close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChainRow {
    expiration: String,
    #[serde(rename = "type")]
    option_type: String,
    strike: f64,
}

/// Provider over a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    data_dir: PathBuf,
    risk_free_rate: f64,
    periods_per_year: f64,
}

impl CsvProvider {
    /// Create a provider rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }

    /// Set the constant risk-free rate
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Set the sampling frequency of the history files
    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    /// Directory the provider reads from
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn history_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    fn chain_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}_options.csv", symbol))
    }

    /// Reads a whole file, mapping "not found" to `NoData`.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, FeedError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Read data file");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FeedError::no_data(format!(
                "file not found: {}",
                path.display()
            ))),
            Err(e) => Err(FeedError::Io(e)),
        }
    }

    /// All `(date, close)` rows, sorted by date.
    async fn load_history(&self, symbol: &str) -> Result<Vec<(Date, Option<f64>)>, FeedError> {
        let path = self.history_path(symbol);
        let bytes = self.read(&path).await?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes.as_slice());

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<HistoryRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            let date = Date::parse(&row.date)
                .map_err(|e| FeedError::parse(format!("{} line {}: {}", path.display(), line, e)))?;
            if let Some(close) = row.close.filter(|c| !c.is_nan()) {
                if !(close.is_finite() && close > 0.0) {
                    return Err(FeedError::parse(format!(
                        "{} line {}: close must be positive, got {}",
                        path.display(),
                        line,
                        close
                    )));
                }
            }
            rows.push((date, row.close));
        }

        if rows.is_empty() {
            return Err(FeedError::no_data(format!("no rows in {}", path.display())));
        }

        rows.sort_by_key(|(date, _)| *date);
        if let Some(w) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(FeedError::parse(format!(
                "{}: duplicate date {}",
                path.display(),
                w[0].0
            )));
        }
        Ok(rows)
    }
}

#[async_trait]
impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn spot_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let symbol = validate_symbol(symbol)?;
        let rows = self.load_history(&symbol).await?;
        rows.iter()
            .rev()
            .find_map(|(_, close)| close.filter(|c| !c.is_nan()))
            .ok_or_else(|| FeedError::no_data(format!("no closing price for '{}'", symbol)))
    }

    async fn historical_prices(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, FeedError> {
        let symbol = validate_symbol(symbol)?;
        let rows = self.load_history(&symbol).await?;

        let Some(&(last, _)) = rows.last() else {
            return Err(FeedError::no_data(format!("no history for '{}'", symbol)));
        };
        let first = last.add_days(-period.calendar_days());
        let closes: Vec<Option<f64>> = rows
            .iter()
            .filter(|(date, _)| *date > first)
            .map(|(_, close)| *close)
            .collect();

        info!(symbol = %symbol, period = %period, observations = closes.len(), "Loaded price history");
        Ok(PriceSeries::from_observations(closes, self.periods_per_year)?)
    }

    async fn option_chain(&self, symbol: &str) -> Result<OptionChain, FeedError> {
        let symbol = validate_symbol(symbol)?;
        let path = self.chain_path(&symbol);
        let bytes = self.read(&path).await?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes.as_slice());

        let mut chain = OptionChain::new();
        for (index, record) in reader.deserialize::<ChainRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            let context =
                |msg: String| FeedError::parse(format!("{} line {}: {}", path.display(), line, msg));

            let expiry = Date::parse(&row.expiration).map_err(|e| context(e.to_string()))?;
            let option_type = row
                .option_type
                .parse::<OptionType>()
                .map_err(|e| context(e.to_string()))?;
            if !(row.strike.is_finite() && row.strike > 0.0) {
                return Err(context(format!("strike must be positive, got {}", row.strike)));
            }
            chain.insert(expiry, option_type, row.strike);
        }

        if chain.is_empty() {
            return Err(FeedError::no_data(format!("no options listed for '{}'", symbol)));
        }
        info!(symbol = %symbol, expirations = chain.len(), "Loaded option chain");
        Ok(chain)
    }

    async fn risk_free_rate(&self) -> Result<f64, FeedError> {
        Ok(self.risk_free_rate)
    }
}
