//! Chain command implementation
//!
//! Prices every listed strike of a symbol's option chain with the
//! historical volatility and the provider's risk-free rate.

use std::fmt;

use adapter_feeds::{HistoryPeriod, MarketDataProvider};
use clap::Args;
use pricer_core::types::{time_to_expiry, Date};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionParameters, OptionType};
use pricer_models::volatility::estimate_annualized_volatility;
use serde::Serialize;
use tracing::{info, warn};

use super::{print_json, provider, valuation_date, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

const RULE: &str = "------------------------------------------------------";

/// Arguments for `optval chain`
#[derive(Debug, Clone, Args)]
pub struct ChainArgs {
    /// Ticker symbol (e.g. AAPL)
    #[arg(short, long)]
    pub symbol: String,

    /// Only price one side (call or put)
    #[arg(short = 't', long = "type")]
    pub option_type: Option<String>,

    /// Valuation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// One priced contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainRow {
    /// Expiration date
    pub expiry: Date,
    /// Years to expiry (ACT/365)
    pub time_to_expiry: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Strike price
    pub strike: f64,
    /// Black-Scholes value
    pub price: f64,
}

/// Priced option chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReport {
    /// Ticker symbol
    pub symbol: String,
    /// Valuation date
    pub as_of: Date,
    /// Spot price
    pub spot: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Historical volatility used for every contract
    pub volatility: f64,
    /// Priced contracts, by expiry then side then strike
    pub rows: Vec<ChainRow>,
}

impl fmt::Display for ChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} as of {}", self.symbol, self.as_of)?;
        writeln!(
            f,
            "Spot {:.2}, rate {:.2}%, volatility {:.2}%",
            self.spot,
            self.risk_free_rate * 100.0,
            self.volatility * 100.0
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "{:<12} {:>8} {:<5} {:>12} {:>12}",
            "Expiry", "T", "Type", "Strike", "Price"
        )?;
        writeln!(f, "{}", RULE)?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<12} {:>8.4} {:<5} {:>12.2} {:>12.4}",
                row.expiry.to_string(),
                row.time_to_expiry,
                row.option_type.as_str(),
                row.strike,
                row.price
            )?;
        }
        write!(f, "{}", RULE)
    }
}

/// Price the chain of `symbol` as of `as_of`
pub async fn compute(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    side: Option<OptionType>,
    period: HistoryPeriod,
    as_of: Date,
) -> Result<ChainReport> {
    let symbol = symbol.trim().to_uppercase();
    let spot = provider.spot_price(&symbol).await?;
    let chain = provider.option_chain(&symbol).await?;
    let rate = provider.risk_free_rate().await?;
    let volatility =
        estimate_annualized_volatility(&provider.historical_prices(&symbol, period).await?)?;

    let sides: &[OptionType] = match side {
        Some(OptionType::Call) => &[OptionType::Call],
        Some(OptionType::Put) => &[OptionType::Put],
        None => &[OptionType::Call, OptionType::Put],
    };

    let mut contracts = Vec::new();
    let mut keys = Vec::new();
    for (expiry, slice) in chain.iter() {
        let t = time_to_expiry(as_of, *expiry);
        if t <= 0.0 {
            warn!(expiry = %expiry, "Skipping expired contracts");
            continue;
        }
        for &option_type in sides {
            for &strike in slice.strikes(option_type) {
                contracts.push(OptionParameters::new(
                    spot,
                    strike,
                    t,
                    rate,
                    volatility,
                    option_type,
                )?);
                keys.push(*expiry);
            }
        }
    }

    let prices = BlackScholes::new().price_batch(&contracts);
    let rows = contracts
        .iter()
        .zip(keys)
        .zip(prices)
        .map(|((params, expiry), price)| ChainRow {
            expiry,
            time_to_expiry: params.time_to_expiry(),
            option_type: params.option_type(),
            strike: params.strike(),
            price,
        })
        .collect::<Vec<_>>();

    info!(symbol = %symbol, contracts = rows.len(), "Priced option chain");
    Ok(ChainReport {
        symbol,
        as_of,
        spot,
        risk_free_rate: rate,
        volatility,
        rows,
    })
}

/// Run the chain command
pub async fn run(args: &ChainArgs, config: &CliConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let side = args
        .option_type
        .as_deref()
        .map(str::parse::<OptionType>)
        .transpose()?;
    let as_of = valuation_date(args.as_of.as_deref())?;
    let provider = provider(config, as_of);

    let report = compute(
        provider.as_ref(),
        &args.symbol,
        side,
        config.history_period,
        as_of,
    )
    .await?;

    match format {
        OutputFormat::Table => println!("{}", report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_feeds::{CsvProvider, SyntheticProvider};

    fn as_of() -> Date {
        Date::from_ymd(2024, 5, 10).unwrap()
    }

    #[tokio::test]
    async fn test_synthetic_chain_is_fully_priced() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        let report = compute(&provider, "MSFT", None, HistoryPeriod::OneYear, as_of())
            .await
            .unwrap();

        assert_eq!(report.symbol, "MSFT");
        assert!(!report.rows.is_empty());
        assert!(report.rows.iter().all(|r| r.time_to_expiry > 0.0));
        assert!(report.rows.iter().all(|r| r.price >= 0.0));
        assert!(report.rows.iter().any(|r| r.option_type == OptionType::Put));
        assert_eq!(report.rows[0].expiry, Date::from_ymd(2024, 5, 17).unwrap());
    }

    #[tokio::test]
    async fn test_side_filter() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        let report = compute(
            &provider,
            "AAPL",
            Some(OptionType::Call),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();
        assert!(report.rows.iter().all(|r| r.option_type == OptionType::Call));
    }

    #[tokio::test]
    async fn test_call_prices_fall_with_strike() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        let report = compute(
            &provider,
            "GOOGL",
            Some(OptionType::Call),
            HistoryPeriod::OneYear,
            as_of(),
        )
        .await
        .unwrap();

        let first_expiry = report.rows[0].expiry;
        let prices: Vec<f64> = report
            .rows
            .iter()
            .filter(|r| r.expiry == first_expiry)
            .map(|r| r.price)
            .collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_expired_contracts_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ACME.csv"),
            "date,close\n2024-05-06,100\n2024-05-07,101\n2024-05-08,99\n2024-05-09,102\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("ACME_options.csv"),
            "expiration,type,strike\n2024-04-19,call,100\n2024-06-21,call,100\n2024-06-21,put,95\n",
        )
        .unwrap();
        let provider = CsvProvider::new(dir.path());

        let report = compute(&provider, "ACME", None, HistoryPeriod::OneYear, as_of())
            .await
            .unwrap();
        assert_eq!(report.spot, 102.0);
        assert_eq!(report.rows.len(), 2);
        assert!(report
            .rows
            .iter()
            .all(|r| r.expiry == Date::from_ymd(2024, 6, 21).unwrap()));
    }

    #[tokio::test]
    async fn test_lowercase_symbol_with_csv_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ACME.csv"),
            "date,close\n2024-05-06,100\n2024-05-07,101\n2024-05-08,99\n2024-05-09,102\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("ACME_options.csv"),
            "expiration,type,strike\n2024-06-21,call,100\n2024-06-21,put,95\n",
        )
        .unwrap();
        let provider = CsvProvider::new(dir.path());

        let report = compute(&provider, "acme", None, HistoryPeriod::OneYear, as_of())
            .await
            .unwrap();
        assert_eq!(report.symbol, "ACME");
        assert_eq!(report.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_table_rendering() {
        let provider = SyntheticProvider::new(42).with_as_of(as_of());
        let report = compute(&provider, "AAPL", None, HistoryPeriod::OneYear, as_of())
            .await
            .unwrap();
        let text = report.to_string();
        assert!(text.starts_with("AAPL as of 2024-05-10"));
        assert!(text.contains("2024-05-17"));
        assert!(text.ends_with(RULE));
    }
}
