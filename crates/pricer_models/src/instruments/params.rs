//! Validated inputs to the Black-Scholes engine.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;

use super::OptionType;
use crate::analytical::BlackScholes;

/// Contract and market parameters for pricing one European option.
///
/// Construction enforces the entity invariants: `spot` and `strike` strictly
/// positive, and every numeric field finite. `time_to_expiry <= 0` (expired)
/// and `volatility <= 0` are accepted; the engine prices them at intrinsic
/// value.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert!(!params.is_degenerate());
///
/// // Non-positive spot is a caller error
/// assert!(OptionParameters::new(0.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParameters {
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl OptionParameters {
    /// Creates validated option parameters.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price (must be > 0)
    /// * `strike` - Strike price (must be > 0)
    /// * `time_to_expiry` - Years to expiration (any finite value)
    /// * `risk_free_rate` - Continuously-compounded annual rate (any finite value)
    /// * `volatility` - Annualised volatility (any finite value)
    /// * `option_type` - Call or Put
    ///
    /// # Errors
    /// `PricingError::InvalidArgument` if spot or strike is not strictly
    /// positive, or if any numeric field is NaN or infinite.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        require_positive("spot", 'S', spot)?;
        require_positive("strike", 'K', strike)?;
        require_finite("time to expiry", 'T', time_to_expiry)?;
        require_finite("risk-free rate", 'r', risk_free_rate)?;
        require_finite("volatility", 'σ', volatility)?;

        Ok(Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Intrinsic value `max(0, S-K)` (call) or `max(0, K-S)` (put).
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// True when the price collapses to intrinsic value (σ <= 0 or T <= 0).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.volatility <= 0.0 || self.time_to_expiry <= 0.0
    }

    /// Same contract with a different strike.
    pub fn with_strike(self, strike: f64) -> Result<Self, PricingError> {
        Self::new(
            self.spot,
            strike,
            self.time_to_expiry,
            self.risk_free_rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Same contract with a different option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }
}

impl Priceable<f64> for OptionParameters {
    /// Prices with the default engine ([`BlackScholes::new`]).
    fn price(&self) -> Result<f64, PricingError> {
        Ok(BlackScholes::new().price(self))
    }
}

fn require_positive(name: &str, symbol: char, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidArgument(format!(
            "{} must be positive and finite: {} = {}",
            name, symbol, value
        )))
    }
}

fn require_finite(name: &str, symbol: char, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidArgument(format!(
            "{} must be finite: {} = {}",
            name, symbol, value
        )))
    }
}
