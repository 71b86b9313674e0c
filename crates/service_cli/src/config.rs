//! CLI configuration management.
//!
//! Loads `optval.toml` when present, falls back to defaults otherwise, then
//! applies `OPTVAL_*` environment overrides and validates the result.

use std::path::{Path, PathBuf};

use adapter_feeds::{HistoryPeriod, DEFAULT_RISK_FREE_RATE};
use pricer_models::volatility::TRADING_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "optval.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Market data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Seeded GBM simulator
    #[default]
    Synthetic,
    /// CSV files under `data_dir`
    Csv,
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Invalid source '{}'. Valid values: synthetic, csv",
                other
            )),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Annualised risk-free rate used when none is given on the command line
    pub risk_free_rate: f64,

    /// Sampling frequency of historical closes
    pub periods_per_year: f64,

    /// Look-back window for historical volatility
    pub history_period: HistoryPeriod,

    /// Market data source
    pub source: DataSource,

    /// Directory holding CSV data files
    pub data_dir: PathBuf,

    /// Seed for the synthetic provider
    pub seed: u64,

    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            history_period: HistoryPeriod::default(),
            source: DataSource::default(),
            data_dir: PathBuf::from("data"),
            seed: 42,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `OPTVAL_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    ///
    /// Every unparsable value is reported, not just the first.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(v) = lookup("OPTVAL_RISK_FREE_RATE") {
            match v.trim().parse() {
                Ok(rate) => self.risk_free_rate = rate,
                Err(_) => errors.push(format!("OPTVAL_RISK_FREE_RATE '{}' is not a number", v)),
            }
        }

        if let Some(v) = lookup("OPTVAL_PERIODS_PER_YEAR") {
            match v.trim().parse() {
                Ok(n) => self.periods_per_year = n,
                Err(_) => errors.push(format!("OPTVAL_PERIODS_PER_YEAR '{}' is not a number", v)),
            }
        }

        if let Some(v) = lookup("OPTVAL_HISTORY_PERIOD") {
            match v.parse() {
                Ok(period) => self.history_period = period,
                Err(e) => errors.push(format!("OPTVAL_HISTORY_PERIOD: {}", e)),
            }
        }

        if let Some(v) = lookup("OPTVAL_SOURCE") {
            match v.parse() {
                Ok(source) => self.source = source,
                Err(e) => errors.push(format!("OPTVAL_SOURCE: {}", e)),
            }
        }

        if let Some(v) = lookup("OPTVAL_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }

        if let Some(v) = lookup("OPTVAL_SEED") {
            match v.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => errors.push(format!("OPTVAL_SEED '{}' is not an unsigned integer", v)),
            }
        }

        if let Some(v) = lookup("OPTVAL_LOG_LEVEL") {
            self.log_level = v;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if !self.risk_free_rate.is_finite() || self.risk_free_rate.abs() >= 1.0 {
            errors.push(format!(
                "risk_free_rate {} must be a finite decimal in (-1, 1), e.g. 0.045 for 4.5%",
                self.risk_free_rate
            ));
        }

        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            errors.push(format!(
                "periods_per_year {} must be positive",
                self.periods_per_year
            ));
        }

        if self.source == DataSource::Csv && self.data_dir.as_os_str().is_empty() {
            errors.push("data_dir cannot be empty when source is csv".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolve, load, override and validate.
    ///
    /// An explicitly given path must exist; the default path may be absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        }
        .with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
