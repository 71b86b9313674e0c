//! Quote command implementation
//!
//! End-to-end valuation of one listed contract: spot, chain, expiry and
//! strike selection, time to expiry, rate, historical volatility, price.
//!
//! Expirations and strikes are chosen either by value or by their 1-based
//! position in the listing (`--expiry 2` or `--strike #3`).

use std::fmt;

use adapter_feeds::{HistoryPeriod, MarketDataProvider, OptionChain};
use clap::Args;
use pricer_core::types::{time_to_expiry, Date};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionParameters, OptionType};
use pricer_models::volatility::estimate_annualized_volatility;
use serde::Serialize;
use tracing::{debug, info};

use super::price::title;
use super::{print_json, provider, valuation_date, OutputFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments for `optval quote`
#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Ticker symbol (e.g. AAPL)
    #[arg(short, long)]
    pub symbol: String,

    /// Expiration date (YYYY-MM-DD) or its 1-based position in the listing
    #[arg(short, long)]
    pub expiry: String,

    /// Strike price, or `#N` for the N-th listed strike
    #[arg(short = 'k', long)]
    pub strike: String,

    /// Option type (call or put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: String,

    /// Valuation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// What the user asked for, before it is matched against the chain
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Ticker symbol
    pub symbol: String,
    /// Expiry selector
    pub expiry: String,
    /// Strike selector
    pub strike: String,
    /// Call or put
    pub option_type: OptionType,
}

/// Valuation of one listed contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteReport {
    /// Ticker symbol
    pub symbol: String,
    /// Call or put
    pub option_type: OptionType,
    /// Spot price
    pub spot: f64,
    /// Selected expiration
    pub expiry: Date,
    /// Years to expiry (ACT/365)
    pub time_to_expiry: f64,
    /// Selected strike
    pub strike: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Historical volatility
    pub volatility: f64,
    /// Black-Scholes value
    pub price: f64,
}

impl fmt::Display for QuoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<30}${:.2}", "Current Stock Price (S):", self.spot)?;
        writeln!(f, "{:<30}{}", "Selected Expiration Date:", self.expiry)?;
        writeln!(f, "{:<30}{:.4} years", "Time to Expiry (T):", self.time_to_expiry)?;
        writeln!(f, "{:<30}${:.2}", "Selected Strike Price (K):", self.strike)?;
        writeln!(
            f,
            "{:<30}{:.2}%",
            "Risk-Free Interest Rate (r):",
            self.risk_free_rate * 100.0
        )?;
        writeln!(
            f,
            "{:<30}{:.2}%",
            "Historical Volatility (σ):",
            self.volatility * 100.0
        )?;
        writeln!(f)?;
        write!(
            f,
            "{} Option Price: ${:.2}",
            title(self.option_type),
            self.price
        )
    }
}

/// Parse a 1-based position into an index below `len`.
fn position(text: &str, len: usize, what: &str) -> Result<usize> {
    let n: usize = text.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!("{} selection '{}' is not a number", what, text))
    })?;
    if n == 0 || n > len {
        return Err(CliError::InvalidArgument(format!(
            "{} selection {} is out of range 1..={}",
            what, n, len
        )));
    }
    Ok(n - 1)
}

/// Resolve `selector` against the chain's expirations.
pub fn select_expiry(chain: &OptionChain, selector: &str) -> Result<Date> {
    let expirations = chain.expirations();
    if selector.contains('-') {
        let wanted = Date::parse(selector.trim())?;
        return expirations
            .into_iter()
            .find(|d| *d == wanted)
            .ok_or_else(|| {
                CliError::InvalidArgument(format!("Expiration {} is not listed", wanted))
            });
    }
    let index = position(selector, expirations.len(), "Expiration")?;
    Ok(expirations[index])
}

/// Resolve `selector` against the listed strikes.
pub fn select_strike(strikes: &[f64], selector: &str) -> Result<f64> {
    if let Some(n) = selector.trim().strip_prefix('#') {
        return Ok(strikes[position(n, strikes.len(), "Strike")?]);
    }
    let wanted: f64 = selector.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!("Strike '{}' is not a number", selector))
    })?;
    strikes
        .iter()
        .copied()
        .find(|k| (k - wanted).abs() <= 1e-9 * k.abs().max(1.0))
        .ok_or_else(|| CliError::InvalidArgument(format!("Strike {} is not listed", wanted)))
}

/// Value the contract selected by `request`
pub async fn compute(
    provider: &dyn MarketDataProvider,
    request: &QuoteRequest,
    period: HistoryPeriod,
    as_of: Date,
) -> Result<QuoteReport> {
    let symbol = request.symbol.trim().to_uppercase();
    let spot = provider.spot_price(&symbol).await?;
    let chain = provider.option_chain(&symbol).await?;

    let expiry = select_expiry(&chain, &request.expiry)?;
    let time_to_expiry = time_to_expiry(as_of, expiry);
    if time_to_expiry <= 0.0 {
        return Err(CliError::InvalidArgument(
            "Expiration date must be in the future".to_string(),
        ));
    }

    let strike = select_strike(chain.strikes(&expiry, request.option_type), &request.strike)?;
    debug!(symbol = %symbol, expiry = %expiry, strike, "Selected contract");

    let rate = provider.risk_free_rate().await?;
    let volatility =
        estimate_annualized_volatility(&provider.historical_prices(&symbol, period).await?)?;

    let params = OptionParameters::new(
        spot,
        strike,
        time_to_expiry,
        rate,
        volatility,
        request.option_type,
    )?;
    let price = BlackScholes::new().price(&params);
    info!(symbol = %symbol, price, "Quote complete");

    Ok(QuoteReport {
        symbol,
        option_type: request.option_type,
        spot,
        expiry,
        time_to_expiry,
        strike,
        risk_free_rate: rate,
        volatility,
        price,
    })
}

/// Run the quote command
pub async fn run(args: &QuoteArgs, config: &CliConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let request = QuoteRequest {
        symbol: args.symbol.clone(),
        expiry: args.expiry.clone(),
        strike: args.strike.clone(),
        option_type: args.option_type.parse()?,
    };
    let as_of = valuation_date(args.as_of.as_deref())?;
    let provider = provider(config, as_of);

    let report = compute(provider.as_ref(), &request, config.history_period, as_of).await?;

    match format {
        OutputFormat::Table => println!("{}", report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_feeds::{CsvProvider, FeedError, SyntheticProvider};
    use approx::assert_relative_eq;
    use pricer_models::analytical;

    fn as_of() -> Date {
        Date::from_ymd(2024, 5, 10).unwrap()
    }

    fn request(expiry: &str, strike: &str, option_type: OptionType) -> QuoteRequest {
        QuoteRequest {
            symbol: "acme".to_string(),
            expiry: expiry.to_string(),
            strike: strike.to_string(),
            option_type,
        }
    }

    fn csv_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ACME.csv"),
            "date,close\n2024-05-06,100\n2024-05-07,101\n2024-05-08,99\n2024-05-09,102\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("ACME_options.csv"),
            "expiration,type,strike\n\
             2024-04-19,call,100\n\
             2024-06-21,call,95\n\
             2024-06-21,call,100\n\
             2024-06-21,put,90\n\
             2024-09-20,call,110\n",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_quote_by_position_and_value_agree() {
        let dir = csv_fixture();
        let provider = CsvProvider::new(dir.path());

        let by_position = compute(
            &provider,
            &request("2", "#2", OptionType::Call),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();
        let by_value = compute(
            &provider,
            &request("2024-06-21", "100", OptionType::Call),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();

        assert_eq!(by_position, by_value);
        assert_eq!(by_value.symbol, "ACME");
        assert_eq!(by_value.spot, 102.0);
        assert_eq!(by_value.strike, 100.0);
        assert_relative_eq!(by_value.time_to_expiry, 42.0 / 365.0, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn test_quote_matches_direct_pricing() {
        let dir = csv_fixture();
        let provider = CsvProvider::new(dir.path());
        let report = compute(
            &provider,
            &request("2024-06-21", "90", OptionType::Put),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();

        let expected = analytical::price(
            report.spot,
            90.0,
            report.time_to_expiry,
            report.risk_free_rate,
            report.volatility,
            OptionType::Put,
        )
        .unwrap();
        assert_eq!(report.price, expected);
    }

    #[tokio::test]
    async fn test_expired_selection_rejected() {
        let dir = csv_fixture();
        let provider = CsvProvider::new(dir.path());
        let result = compute(
            &provider,
            &request("1", "100", OptionType::Call),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await;

        match result {
            Err(CliError::InvalidArgument(msg)) => {
                assert_eq!(msg, "Expiration date must be in the future")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unlisted_selections_rejected() {
        let dir = csv_fixture();
        let provider = CsvProvider::new(dir.path());

        for (expiry, strike) in [("2024-07-19", "100"), ("2024-06-21", "105"), ("9", "100"), ("2", "#5")] {
            assert!(matches!(
                compute(
                    &provider,
                    &request(expiry, strike, OptionType::Call),
                    HistoryPeriod::OneYear,
                    as_of(),
                )
                .await,
                Err(CliError::InvalidArgument(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_side_without_strikes() {
        let dir = csv_fixture();
        let provider = CsvProvider::new(dir.path());
        assert!(matches!(
            compute(
                &provider,
                &request("2024-09-20", "#1", OptionType::Put),
                HistoryPeriod::OneYear,
                as_of(),
            )
            .await,
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        assert!(matches!(
            compute(
                &provider,
                &request("1", "#1", OptionType::Call),
                HistoryPeriod::OneYear,
                as_of(),
            )
            .await,
            Err(CliError::Feed(FeedError::NoData(_)))
        ));
    }

    #[tokio::test]
    async fn test_synthetic_quote_rendering() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        let report = compute(
            &provider,
            &QuoteRequest {
                symbol: "AAPL".to_string(),
                ..request("1", "#1", OptionType::Put)
            },
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();

        assert_eq!(report.expiry, Date::from_ymd(2024, 5, 17).unwrap());
        let text = report.to_string();
        assert!(text.starts_with("Current Stock Price (S):"));
        assert!(text.contains(&format!("{:<30}2024-05-17", "Selected Expiration Date:")));
        assert!(text.contains("\n\nPut Option Price: $"));
    }

    #[test]
    fn test_select_strike() {
        let strikes = [90.0, 95.0, 100.0];
        assert_eq!(select_strike(&strikes, "#1").unwrap(), 90.0);
        assert_eq!(select_strike(&strikes, " 95 ").unwrap(), 95.0);
        assert!(select_strike(&strikes, "#0").is_err());
        assert!(select_strike(&strikes, "abc").is_err());
        assert!(select_strike(&[], "#1").is_err());
    }
}
