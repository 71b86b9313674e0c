//! Check command implementation
//!
//! Prints the effective configuration after file loading, environment
//! overrides and validation.

use tracing::warn;

use super::{provider, valuation_date};
use crate::config::{CliConfig, ConfigError, DataSource};
use crate::Result;

/// Render the effective configuration as TOML plus provider notes.
pub fn render(config: &CliConfig) -> Result<String> {
    let body = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    let provider = provider(config, valuation_date(None)?);

    let mut out = String::from("# Effective configuration\n");
    out.push_str(&body);
    out.push_str(&format!("\n# Market data provider: {}\n", provider.name()));
    if config.source == DataSource::Csv && !config.data_dir.is_dir() {
        warn!(data_dir = %config.data_dir.display(), "Data directory does not exist");
        out.push_str(&format!(
            "# Warning: data directory '{}' does not exist\n",
            config.data_dir.display()
        ));
    }
    Ok(out)
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    print!("{}", render(config)?);
    println!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default() {
        let text = render(&CliConfig::default()).unwrap();
        assert!(text.contains("risk_free_rate = 0.045"));
        assert!(text.contains("source = \"synthetic\""));
        assert!(text.contains("history_period = \"1y\""));
        assert!(text.contains("# Market data provider: synthetic"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_render_round_trips_through_toml() {
        let config = CliConfig {
            seed: 7,
            ..CliConfig::default()
        };
        let text = render(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_csv_directory_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            source: DataSource::Csv,
            data_dir: dir.path().join("absent"),
            ..CliConfig::default()
        };
        let text = render(&config).unwrap();
        assert!(text.contains("# Market data provider: csv"));
        assert!(text.contains("Warning: data directory"));
    }
}
