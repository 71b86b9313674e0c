//! Black-Scholes pricing engine for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! When σ <= 0 or T <= 0 the price is the intrinsic value. This branch is
//! taken before σ√T is formed, so no division by zero can occur.

use rayon::prelude::*;

use pricer_core::types::PricingError;

use super::distributions::{ErfcNormal, NormalCdf};
use crate::instruments::{OptionParameters, OptionType};

/// Black-Scholes engine, generic over the normal CDF it evaluates.
///
/// The engine holds no market state; every call to [`price`](Self::price)
/// takes a complete [`OptionParameters`] value. It is `Copy + Send + Sync`
/// whenever the CDF is.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::{OptionParameters, OptionType};
///
/// let bs = BlackScholes::new();
/// let call = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let put = call.with_option_type(OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.price(&call) - bs.price(&put) - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes<C: NormalCdf = ErfcNormal> {
    cdf: C,
}

impl BlackScholes<ErfcNormal> {
    /// Creates an engine with the default `erfc`-based CDF.
    pub fn new() -> Self {
        Self { cdf: ErfcNormal }
    }
}

impl<C: NormalCdf> BlackScholes<C> {
    /// Creates an engine using the given CDF implementation.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::distributions::HartNormal;
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionParameters, OptionType};
    ///
    /// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    /// let reference = BlackScholes::with_cdf(HartNormal).price(&params);
    /// assert!((reference - BlackScholes::new().price(&params)).abs() < 1e-10);
    /// ```
    pub fn with_cdf(cdf: C) -> Self {
        Self { cdf }
    }

    /// Returns the CDF used by this engine.
    #[inline]
    pub fn cdf(&self) -> &C {
        &self.cdf
    }

    /// Computes d₁ and d₂.
    ///
    /// Returns `None` for degenerate parameters (σ <= 0 or T <= 0), where the
    /// terms are undefined.
    #[inline]
    pub fn d1_d2(&self, params: &OptionParameters) -> Option<(f64, f64)> {
        if params.is_degenerate() {
            return None;
        }

        let t = params.time_to_expiry();
        let sigma = params.volatility();
        let vol_sqrt_t = sigma * t.sqrt();

        let log_moneyness = (params.spot() / params.strike()).ln();
        let drift = (params.risk_free_rate() + 0.5 * sigma * sigma) * t;

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        Some((d1, d1 - vol_sqrt_t))
    }

    /// Prices a European option.
    ///
    /// Degenerate inputs (σ <= 0 or T <= 0) return the exact intrinsic value.
    /// Otherwise the closed form is evaluated and floored at zero to absorb
    /// rounding noise in deep out-of-the-money tails.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionParameters, OptionType};
    ///
    /// let expired = OptionParameters::new(110.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap();
    /// assert_eq!(BlackScholes::new().price(&expired), 10.0);
    /// ```
    pub fn price(&self, params: &OptionParameters) -> f64 {
        let Some((d1, d2)) = self.d1_d2(params) else {
            return params.intrinsic_value();
        };

        let spot = params.spot();
        let discounted_strike =
            params.strike() * (-params.risk_free_rate() * params.time_to_expiry()).exp();

        let value = match params.option_type() {
            OptionType::Call => spot * self.cdf.cdf(d1) - discounted_strike * self.cdf.cdf(d2),
            OptionType::Put => discounted_strike * self.cdf.cdf(-d2) - spot * self.cdf.cdf(-d1),
        };

        value.max(0.0)
    }

    /// Prices many contracts in parallel, preserving input order.
    pub fn price_batch(&self, contracts: &[OptionParameters]) -> Vec<f64> {
        contracts.par_iter().map(|p| self.price(p)).collect()
    }
}

/// Prices a European option from raw inputs with the default engine.
///
/// # Errors
/// `PricingError::InvalidArgument` if spot or strike is not strictly positive
/// or any input is non-finite.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price;
/// use pricer_models::instruments::OptionType;
///
/// let call = price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert!((call - 10.45).abs() < 0.01);
///
/// assert!(price(-1.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
/// ```
pub fn price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let params = OptionParameters::new(
        spot,
        strike,
        time_to_expiry,
        risk_free_rate,
        volatility,
        option_type,
    )?;
    Ok(BlackScholes::new().price(&params))
}
