//! Price command implementation
//!
//! Prices a single European option from explicit inputs.

use std::fmt;

use clap::Args;
use pricer_core::types::{time_to_expiry, Date};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionParameters, OptionType};
use serde::Serialize;
use tracing::{debug, info};

use super::{print_json, valuation_date, OutputFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments for `optval price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Current underlying price (S)
    #[arg(long)]
    pub spot: f64,

    /// Strike price (K)
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years (T)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "expiry_date")]
    pub expiry_years: Option<f64>,

    /// Expiration date (YYYY-MM-DD), converted to years ACT/365
    #[arg(long)]
    pub expiry_date: Option<String>,

    /// Risk-free rate as a decimal; defaults to the configured rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Annualised volatility as a decimal (σ)
    #[arg(long, allow_negative_numbers = true)]
    pub vol: f64,

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

/// Result of pricing one option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    /// Call or put
    pub option_type: OptionType,
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Years to expiry
    pub time_to_expiry: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Immediate-exercise value
    pub intrinsic_value: f64,
    /// Black-Scholes value
    pub price: f64,
}

impl PriceReport {
    /// Builds the report for validated parameters.
    pub fn from_params(params: &OptionParameters) -> Self {
        Self {
            option_type: params.option_type(),
            spot: params.spot(),
            strike: params.strike(),
            time_to_expiry: params.time_to_expiry(),
            risk_free_rate: params.risk_free_rate(),
            volatility: params.volatility(),
            intrinsic_value: params.intrinsic_value(),
            price: BlackScholes::new().price(params),
        }
    }
}

impl fmt::Display for PriceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<25}{:.2}", "Spot Price (S):", self.spot)?;
        writeln!(f, "{:<25}{:.2}", "Strike Price (K):", self.strike)?;
        writeln!(f, "{:<25}{:.4} years", "Time to Expiry (T):", self.time_to_expiry)?;
        writeln!(f, "{:<25}{:.2}%", "Risk-Free Rate (r):", self.risk_free_rate * 100.0)?;
        writeln!(f, "{:<25}{:.2}%", "Volatility (σ):", self.volatility * 100.0)?;
        writeln!(f, "{:<25}{:.2}", "Intrinsic Value:", self.intrinsic_value)?;
        write!(
            f,
            "{:<25}{:.2}",
            format!("{} Option Price:", title(self.option_type)),
            self.price
        )
    }
}

/// `Call` / `Put`
pub(crate) fn title(option_type: OptionType) -> &'static str {
    match option_type {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    }
}

/// Time to expiry from either argument form.
fn resolve_expiry(args: &PriceArgs) -> Result<f64> {
    match (args.expiry_years, args.expiry_date.as_deref()) {
        (Some(years), None) => Ok(years),
        (None, Some(date)) => {
            let as_of = valuation_date(args.as_of.as_deref())?;
            Ok(time_to_expiry(as_of, Date::parse(date)?))
        }
        _ => Err(CliError::InvalidArgument(
            "Exactly one of --expiry-years or --expiry-date is required".to_string(),
        )),
    }
}

/// Price the option described by `args`
pub fn compute(args: &PriceArgs, config: &CliConfig) -> Result<PriceReport> {
    let option_type: OptionType = args.option_type.parse()?;
    let time_to_expiry = resolve_expiry(args)?;
    let rate = args.rate.unwrap_or(config.risk_free_rate);

    let params = OptionParameters::new(
        args.spot,
        args.strike,
        time_to_expiry,
        rate,
        args.vol,
        option_type,
    )?;
    if params.is_degenerate() {
        debug!(
            time_to_expiry,
            volatility = args.vol,
            "Degenerate inputs, pricing at intrinsic value"
        );
    }

    Ok(PriceReport::from_params(&params))
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let report = compute(args, config)?;
    info!(price = report.price, "Pricing complete");

    match format {
        OutputFormat::Table => println!("{}", report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::PricingError;

    fn args() -> PriceArgs {
        PriceArgs {
            spot: 100.0,
            strike: 100.0,
            expiry_years: Some(1.0),
            expiry_date: None,
            rate: Some(0.05),
            vol: 0.2,
            option_type: "call".to_string(),
            as_of: None,
            format: "table".to_string(),
        }
    }

    #[test]
    fn test_compute_call_and_put() {
        let config = CliConfig::default();
        let call = compute(&args(), &config).unwrap();
        assert_relative_eq!(call.price, 10.4506, epsilon = 1e-4);

        let put = compute(
            &PriceArgs {
                option_type: "PUT".to_string(),
                ..args()
            },
            &config,
        )
        .unwrap();
        assert_relative_eq!(put.price, 5.5735, epsilon = 1e-4);
        assert_eq!(put.option_type, OptionType::Put);
    }

    #[test]
    fn test_rate_defaults_to_config() {
        let config = CliConfig {
            risk_free_rate: 0.02,
            ..CliConfig::default()
        };
        let report = compute(&PriceArgs { rate: None, ..args() }, &config).unwrap();
        assert_eq!(report.risk_free_rate, 0.02);
    }

    #[test]
    fn test_expiry_date_is_act_365() {
        let report = compute(
            &PriceArgs {
                expiry_years: None,
                expiry_date: Some("2025-01-01".to_string()),
                as_of: Some("2024-01-01".to_string()),
                ..args()
            },
            &CliConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(report.time_to_expiry, 366.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_past_expiry_prices_intrinsic() {
        let report = compute(
            &PriceArgs {
                spot: 120.0,
                expiry_years: None,
                expiry_date: Some("2024-01-01".to_string()),
                as_of: Some("2024-02-01".to_string()),
                ..args()
            },
            &CliConfig::default(),
        )
        .unwrap();
        assert!(report.time_to_expiry < 0.0);
        assert_eq!(report.price, 20.0);
    }

    #[test]
    fn test_missing_or_both_expiries_rejected() {
        let neither = PriceArgs {
            expiry_years: None,
            ..args()
        };
        assert!(matches!(
            compute(&neither, &CliConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));

        let both = PriceArgs {
            expiry_date: Some("2030-01-01".to_string()),
            ..args()
        };
        assert!(matches!(
            compute(&both, &CliConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_inputs_surface_pricing_errors() {
        let bad_type = PriceArgs {
            option_type: "straddle".to_string(),
            ..args()
        };
        assert!(matches!(
            compute(&bad_type, &CliConfig::default()),
            Err(CliError::Pricing(PricingError::InvalidArgument(_)))
        ));

        let bad_spot = PriceArgs {
            spot: -1.0,
            ..args()
        };
        assert!(matches!(
            compute(&bad_spot, &CliConfig::default()),
            Err(CliError::Pricing(PricingError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn test_table_rendering() {
        let text = compute(&args(), &CliConfig::default()).unwrap().to_string();
        assert!(text.contains("Spot Price (S):          100.00"));
        assert!(text.contains("Volatility (σ):          20.00%"));
        assert!(text.ends_with("Call Option Price:       10.45"));
    }

    #[test]
    fn test_json_field_names() {
        let report = compute(&args(), &CliConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["option_type"], "call");
        assert_eq!(json["spot"], 100.0);
        assert!(json["price"].as_f64().unwrap() > 10.0);
    }
}
