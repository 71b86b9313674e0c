//! Close-to-close historical volatility.

use pricer_core::math::statistics::{sample_std_dev, MIN_VARIANCE_SAMPLES};
use pricer_core::types::PricingError;

use super::series::{PriceSeries, TRADING_DAYS_PER_YEAR};

/// Annualised standard deviation of log returns.
///
/// 1. Log returns between adjacent present observations
/// 2. Unbiased sample standard deviation (n - 1)
/// 3. Multiply by `sqrt(periods_per_year)`
///
/// # Errors
/// - `PricingError::NoData` if the series is empty or every observation is missing
/// - `PricingError::InsufficientData` if fewer than two returns survive cleaning
///
/// # Examples
/// ```
/// use pricer_models::volatility::{estimate_annualized_volatility, PriceSeries};
///
/// let flat = PriceSeries::daily(vec![50.0; 10]).unwrap();
/// assert_eq!(estimate_annualized_volatility(&flat).unwrap(), 0.0);
///
/// let empty = PriceSeries::daily(vec![]).unwrap();
/// assert!(estimate_annualized_volatility(&empty).is_err());
/// ```
pub fn estimate_annualized_volatility(series: &PriceSeries) -> Result<f64, PricingError> {
    if series.present_count() == 0 {
        return Err(PricingError::NoData(
            "price series has no observations".to_string(),
        ));
    }

    let returns = series.log_returns();
    if returns.len() < MIN_VARIANCE_SAMPLES {
        return Err(PricingError::InsufficientData {
            got: returns.len(),
            need: MIN_VARIANCE_SAMPLES,
        });
    }

    let std = sample_std_dev(&returns)?;
    Ok(std * series.periods_per_year().sqrt())
}

/// Historical volatility estimator over raw closing prices.
///
/// Carries the sampling frequency so callers holding a plain `&[f64]` of
/// closes (NaN for missing) need not build a [`PriceSeries`] themselves.
///
/// # Examples
/// ```
/// use pricer_models::volatility::HistoricalVolatility;
///
/// let hv = HistoricalVolatility::default();
/// let vol = hv.estimate(&[100.0, 101.0, 99.5, 100.5, 102.0]).unwrap();
/// assert!(vol > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalVolatility {
    periods_per_year: f64,
}

impl HistoricalVolatility {
    /// Creates an estimator for the given sampling frequency.
    ///
    /// # Errors
    /// `PricingError::InvalidArgument` if `periods_per_year` is not positive
    /// and finite.
    pub fn new(periods_per_year: f64) -> Result<Self, PricingError> {
        if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "periods per year must be positive and finite, got {}",
                periods_per_year
            )));
        }
        Ok(Self { periods_per_year })
    }

    /// Sampling frequency used for annualisation.
    #[inline]
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Builds a series from `closes` at this estimator's frequency.
    pub fn series(&self, closes: &[f64]) -> Result<PriceSeries, PricingError> {
        PriceSeries::new(closes.to_vec(), self.periods_per_year)
    }

    /// Annualised volatility of `closes`.
    pub fn estimate(&self, closes: &[f64]) -> Result<f64, PricingError> {
        estimate_annualized_volatility(&self.series(closes)?)
    }
}

impl Default for HistoricalVolatility {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}
