//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands split into a
//! `compute` step returning a serialisable report and a `run` step that
//! renders it, so the computation is testable without capturing stdout.

pub mod chain;
pub mod check;
pub mod price;
pub mod quote;
pub mod vol;

use std::str::FromStr;

use adapter_feeds::{CsvProvider, MarketDataProvider, SyntheticProvider};
use pricer_core::types::Date;
use serde::Serialize;

use crate::config::{CliConfig, DataSource};
use crate::{CliError, Result};

/// Output format shared by all reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Valuation date: the given `YYYY-MM-DD`, or today.
pub fn valuation_date(as_of: Option<&str>) -> Result<Date> {
    match as_of {
        Some(s) => Ok(Date::parse(s)?),
        None => Ok(Date::today()),
    }
}

/// Builds the configured market data provider.
pub fn provider(config: &CliConfig, as_of: Date) -> Box<dyn MarketDataProvider> {
    match config.source {
        DataSource::Synthetic => Box::new(
            SyntheticProvider::new(config.seed)
                .with_as_of(as_of)
                .with_risk_free_rate(config.risk_free_rate)
                .with_periods_per_year(config.periods_per_year),
        ),
        DataSource::Csv => Box::new(
            CsvProvider::new(config.data_dir.clone())
                .with_risk_free_rate(config.risk_free_rate)
                .with_periods_per_year(config.periods_per_year),
        ),
    }
}

/// Writes `report` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "csv".parse::<OutputFormat>(),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_valuation_date() {
        assert_eq!(
            valuation_date(Some("2024-06-03")).unwrap(),
            Date::from_ymd(2024, 6, 3).unwrap()
        );
        assert!(matches!(valuation_date(Some("06/03/2024")), Err(CliError::Date(_))));
        assert_eq!(valuation_date(None).unwrap(), Date::today());
    }

    #[test]
    fn test_provider_follows_source() {
        let as_of = Date::from_ymd(2024, 6, 3).unwrap();
        let synthetic = provider(&CliConfig::default(), as_of);
        assert_eq!(synthetic.name(), "synthetic");

        let csv = CliConfig {
            source: DataSource::Csv,
            ..CliConfig::default()
        };
        assert_eq!(provider(&csv, as_of).name(), "csv");
    }
}
