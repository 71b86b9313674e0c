//! Seeded synthetic market data.
//!
//! Each instrument follows a Geometric Brownian Motion sampled once per
//! trading session:
//!
//! S(t+dt) = S(t) · exp((μ − σ²/2)·dt + σ·√dt·Z)
//!
//! The path for a symbol depends only on the provider seed and the ticker, so
//! spot, history and chain are mutually consistent across calls.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use pricer_core::types::Date;
use pricer_models::instruments::OptionType;
use pricer_models::volatility::{PriceSeries, TRADING_DAYS_PER_YEAR};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use super::{validate_symbol, MarketDataProvider, DEFAULT_RISK_FREE_RATE};
use crate::chain::OptionChain;
use crate::error::FeedError;
use crate::period::HistoryPeriod;

/// Sessions simulated per path; enough for the longest history period.
const SIMULATED_SESSIONS: usize = 1260;

/// Monthly expirations listed in a synthetic chain.
const LISTED_EXPIRIES: usize = 6;

/// Strikes span spot · (1 ± STRIKE_RANGE).
const STRIKE_RANGE: f64 = 0.2;

/// Specification for a simulated instrument
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSpec {
    /// Ticker symbol
    pub ticker: String,
    /// Price at the start of the simulated path
    pub initial_price: f64,
    /// Volatility (annualized)
    pub volatility: f64,
    /// Drift (annualized)
    pub drift: f64,
}

impl Default for InstrumentSpec {
    fn default() -> Self {
        Self {
            ticker: "UNKNOWN".to_string(),
            initial_price: 100.0,
            volatility: 0.20,
            drift: 0.0,
        }
    }
}

impl InstrumentSpec {
    fn new(ticker: &str, initial_price: f64, volatility: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            initial_price,
            volatility,
            ..Self::default()
        }
    }
}

/// Deterministic provider backed by simulated GBM paths.
///
/// # Examples
/// ```
/// use adapter_feeds::{MarketDataProvider, SyntheticProvider};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let provider = SyntheticProvider::new(42);
/// let spot = provider.spot_price("AAPL").await.unwrap();
/// assert!(spot > 0.0);
/// assert!(provider.spot_price("NOPE").await.is_err());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    instruments: Vec<InstrumentSpec>,
    seed: u64,
    as_of: Date,
    risk_free_rate: f64,
    periods_per_year: f64,
}

impl SyntheticProvider {
    /// Create a provider with the default instrument universe, valued today.
    pub fn new(seed: u64) -> Self {
        Self {
            instruments: Self::default_instruments(),
            seed,
            as_of: Date::today(),
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }

    /// Replace the instrument universe
    pub fn with_instruments(mut self, instruments: Vec<InstrumentSpec>) -> Self {
        self.instruments = instruments;
        self
    }

    /// Set the date the simulated path ends on
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = as_of;
        self
    }

    /// Set the constant risk-free rate
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Set the sampling frequency attached to returned series
    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    /// Simulated instruments
    pub fn instruments(&self) -> &[InstrumentSpec] {
        &self.instruments
    }

    /// Default equity instruments
    fn default_instruments() -> Vec<InstrumentSpec> {
        vec![
            InstrumentSpec::new("AAPL", 185.0, 0.25),
            InstrumentSpec::new("GOOGL", 140.0, 0.28),
            InstrumentSpec::new("MSFT", 380.0, 0.22),
            InstrumentSpec::new("7203.T", 2800.0, 0.20), // Toyota
            InstrumentSpec::new("DBK.DE", 15.50, 0.35),  // Deutsche Bank
        ]
    }

    fn spec(&self, symbol: &str) -> Result<&InstrumentSpec, FeedError> {
        let symbol = validate_symbol(symbol)?;
        self.instruments
            .iter()
            .find(|s| s.ticker.eq_ignore_ascii_case(&symbol))
            .ok_or_else(|| FeedError::no_data(format!("unknown symbol '{}'", symbol)))
    }

    /// Full daily close path for `spec`, oldest first, ending at `as_of`.
    fn simulate(&self, spec: &InstrumentSpec) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ ticker_hash(&spec.ticker));
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let drift_term = (spec.drift - 0.5 * spec.volatility * spec.volatility) * dt;
        let diffusion = spec.volatility * dt.sqrt();

        let mut prices = Vec::with_capacity(SIMULATED_SESSIONS + 1);
        let mut price = spec.initial_price;
        prices.push(price);
        for _ in 0..SIMULATED_SESSIONS {
            let z: f64 = StandardNormal.sample(&mut rng);
            price *= (drift_term + diffusion * z).exp();
            prices.push(price);
        }

        debug!(
            ticker = %spec.ticker,
            sessions = SIMULATED_SESSIONS,
            last = price,
            "Simulated price path"
        );
        prices
    }

    /// Third Friday of each month after `as_of`.
    fn listed_expiries(&self) -> Vec<Date> {
        let as_of = self.as_of.into_inner();
        let (mut year, mut month) = (as_of.year(), as_of.month());
        let mut expiries = Vec::with_capacity(LISTED_EXPIRIES);

        while expiries.len() < LISTED_EXPIRIES {
            if let Some(friday) = NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, 3) {
                if friday > as_of {
                    expiries.push(Date::from(friday));
                }
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        expiries
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(42)
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn spot_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let spec = self.spec(symbol)?;
        self.simulate(spec)
            .last()
            .copied()
            .ok_or_else(|| FeedError::no_data(format!("no prices for '{}'", spec.ticker)))
    }

    async fn historical_prices(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, FeedError> {
        let spec = self.spec(symbol)?;
        let path = self.simulate(spec);
        let start = path.len().saturating_sub(period.trading_days() + 1);
        Ok(PriceSeries::new(path[start..].to_vec(), self.periods_per_year)?)
    }

    async fn option_chain(&self, symbol: &str) -> Result<OptionChain, FeedError> {
        let spot = self.spot_price(symbol).await?;
        let step = strike_step(spot);
        let first = ((spot * (1.0 - STRIKE_RANGE)) / step).ceil() as i64;
        let last = ((spot * (1.0 + STRIKE_RANGE)) / step).floor() as i64;

        let mut chain = OptionChain::new();
        for expiry in self.listed_expiries() {
            for i in first.max(1)..=last {
                let strike = i as f64 * step;
                chain.insert(expiry, OptionType::Call, strike);
                chain.insert(expiry, OptionType::Put, strike);
            }
        }
        Ok(chain)
    }

    async fn risk_free_rate(&self) -> Result<f64, FeedError> {
        Ok(self.risk_free_rate)
    }
}

/// Listed strike increment: 2.5% of spot rounded up to 1, 2.5 or 5 × 10ⁿ.
fn strike_step(spot: f64) -> f64 {
    let raw = spot * 0.025;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let factor = [1.0, 2.5, 5.0]
        .into_iter()
        .find(|&f| normalized <= f)
        .unwrap_or(10.0);
    factor * magnitude
}

/// FNV-1a over the upper-cased ticker, stable across runs and platforms.
fn ticker_hash(ticker: &str) -> u64 {
    ticker
        .bytes()
        .map(|b| b.to_ascii_uppercase())
        .fold(0xcbf2_9ce4_8422_2325, |hash, b| {
            (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        })
}
