//! Vol command implementation
//!
//! Estimates annualised historical volatility from the provider's closes.

use std::fmt;

use adapter_feeds::{HistoryPeriod, MarketDataProvider};
use clap::Args;
use pricer_models::volatility::estimate_annualized_volatility;
use serde::Serialize;
use tracing::info;

use super::{print_json, provider, valuation_date, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments for `optval vol`
#[derive(Debug, Clone, Args)]
pub struct VolArgs {
    /// Ticker symbol (e.g. AAPL)
    #[arg(short, long)]
    pub symbol: String,

    /// Look-back period (1mo, 3mo, 6mo, 1y, 2y, 5y); defaults to the configured period
    #[arg(short, long)]
    pub period: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Historical volatility estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolReport {
    /// Ticker symbol
    pub symbol: String,
    /// Look-back period
    pub period: HistoryPeriod,
    /// Observations in the window, missing included
    pub observations: usize,
    /// Log returns that survived gap removal
    pub returns: usize,
    /// Annualisation frequency
    pub periods_per_year: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl fmt::Display for VolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<25}{}", "Symbol:", self.symbol)?;
        writeln!(f, "{:<25}{}", "Period:", self.period)?;
        writeln!(
            f,
            "{:<25}{} ({} returns)",
            "Observations:", self.observations, self.returns
        )?;
        write!(f, "{:<25}{:.2}%", "Volatility (σ):", self.volatility * 100.0)
    }
}

/// Estimate volatility of `symbol` over `period` from `provider`
pub async fn estimate(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    period: HistoryPeriod,
) -> Result<VolReport> {
    let symbol = symbol.trim().to_uppercase();
    let series = provider.historical_prices(&symbol, period).await?;
    let volatility = estimate_annualized_volatility(&series)?;

    Ok(VolReport {
        symbol,
        period,
        observations: series.len(),
        returns: series.log_returns().len(),
        periods_per_year: series.periods_per_year(),
        volatility,
    })
}

/// Run the vol command
pub async fn run(args: &VolArgs, config: &CliConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let period = match &args.period {
        Some(p) => p.parse()?,
        None => config.history_period,
    };
    let provider = provider(config, valuation_date(None)?);

    let report = estimate(provider.as_ref(), &args.symbol, period).await?;
    info!(
        symbol = %report.symbol,
        volatility = report.volatility,
        "Volatility estimated"
    );

    match format {
        OutputFormat::Table => println!("{}", report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
