//! Chronological price series with possibly-missing observations.

use pricer_core::math::statistics;
use pricer_core::types::PricingError;

/// Trading days per year for daily equity data.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Ordered price observations, oldest first.
///
/// Each observation is either a positive finite price or missing. A missing
/// observation is never read as a zero return: returns that would span it are
/// dropped by the estimator.
///
/// # Examples
/// ```
/// use pricer_models::volatility::PriceSeries;
///
/// // NaN marks a missing close
/// let series = PriceSeries::daily(vec![100.0, f64::NAN, 101.0, 102.0]).unwrap();
/// assert_eq!(series.len(), 4);
/// assert_eq!(series.present_count(), 3);
/// assert_eq!(series.last_present(), Some(102.0));
/// assert_eq!(series.periods_per_year(), 252.0);
///
/// // Non-positive prices are rejected
/// assert!(PriceSeries::daily(vec![100.0, 0.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceSeries {
    observations: Vec<Option<f64>>,
    periods_per_year: f64,
}

impl PriceSeries {
    /// Builds a series from raw values, treating NaN as missing.
    ///
    /// # Errors
    /// `PricingError::InvalidArgument` if a present value is non-positive or
    /// infinite, or if `periods_per_year` is not finite and positive.
    pub fn new(prices: Vec<f64>, periods_per_year: f64) -> Result<Self, PricingError> {
        let observations = prices
            .into_iter()
            .map(|p| if p.is_nan() { None } else { Some(p) })
            .collect();
        Self::from_observations(observations, periods_per_year)
    }

    /// Builds a series from explicit observations.
    ///
    /// `Some(NaN)` is normalised to `None`.
    ///
    /// # Errors
    /// Same as [`PriceSeries::new`].
    pub fn from_observations(
        observations: Vec<Option<f64>>,
        periods_per_year: f64,
    ) -> Result<Self, PricingError> {
        if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "periods per year must be positive and finite, got {}",
                periods_per_year
            )));
        }

        let observations: Vec<Option<f64>> = observations
            .into_iter()
            .map(|o| o.filter(|p| !p.is_nan()))
            .collect();

        if let Some((index, price)) = observations
            .iter()
            .enumerate()
            .find_map(|(i, o)| o.filter(|p| !(p.is_finite() && *p > 0.0)).map(|p| (i, p)))
        {
            return Err(PricingError::InvalidArgument(format!(
                "price at index {} must be positive and finite, got {}",
                index, price
            )));
        }

        Ok(Self {
            observations,
            periods_per_year,
        })
    }

    /// Daily series annualised with [`TRADING_DAYS_PER_YEAR`].
    pub fn daily(prices: Vec<f64>) -> Result<Self, PricingError> {
        Self::new(prices, TRADING_DAYS_PER_YEAR)
    }

    /// All observations in chronological order.
    #[inline]
    pub fn observations(&self) -> &[Option<f64>] {
        &self.observations
    }

    /// Sampling frequency used for annualisation.
    #[inline]
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Total number of observations, missing included.
    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if the series has no observations at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of present (non-missing) observations.
    pub fn present_count(&self) -> usize {
        self.observations.iter().flatten().count()
    }

    /// Most recent present observation.
    pub fn last_present(&self) -> Option<f64> {
        self.observations.iter().rev().find_map(|o| *o)
    }

    /// Log returns between adjacent observations that are both present.
    ///
    /// A missing observation removes the returns on both sides of it; no
    /// return is bridged across a gap. Each run of consecutive present prices
    /// goes through [`statistics::log_returns`].
    ///
    /// # Examples
    /// ```
    /// use pricer_models::volatility::PriceSeries;
    ///
    /// let series = PriceSeries::daily(vec![100.0, 101.0, f64::NAN, 103.0, 104.0]).unwrap();
    /// let r = series.log_returns();
    /// assert_eq!(r.len(), 2);
    /// assert!((r[1] - (104.0_f64 / 103.0).ln()).abs() < 1e-15);
    /// ```
    pub fn log_returns(&self) -> Vec<f64> {
        self.observations
            .split(Option::is_none)
            .flat_map(|run| {
                let prices: Vec<f64> = run.iter().flatten().copied().collect();
                statistics::log_returns(&prices)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_missing() {
        let s = PriceSeries::daily(vec![f64::NAN, 1.0, f64::NAN]).unwrap();
        assert_eq!(s.observations(), &[None, Some(1.0), None]);
        assert_eq!(s.present_count(), 1);
    }

    #[test]
    fn test_from_observations_normalises_some_nan() {
        let s = PriceSeries::from_observations(vec![Some(f64::NAN), Some(2.0)], 52.0).unwrap();
        assert_eq!(s.observations(), &[None, Some(2.0)]);
        assert_eq!(s.periods_per_year(), 52.0);
    }

    #[test]
    fn test_rejects_bad_prices() {
        for bad in [0.0, -1.0, f64::INFINITY] {
            match PriceSeries::daily(vec![100.0, bad]) {
                Err(PricingError::InvalidArgument(msg)) => assert!(msg.contains("index 1")),
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_bad_periods_per_year() {
        for bad in [0.0, -252.0, f64::NAN, f64::INFINITY] {
            assert!(PriceSeries::new(vec![1.0, 2.0], bad).is_err());
        }
    }

    #[test]
    fn test_empty_series() {
        let s = PriceSeries::daily(vec![]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.last_present(), None);
        assert!(s.log_returns().is_empty());
    }

    #[test]
    fn test_log_returns_skip_gaps() {
        let s = PriceSeries::daily(vec![100.0, f64::NAN, 110.0, 121.0, f64::NAN, f64::NAN, 50.0, 55.0])
            .unwrap();
        let r = s.log_returns();
        assert_eq!(r.len(), 2);
        assert!((r[0] - 1.1_f64.ln()).abs() < 1e-15);
        assert!((r[1] - 1.1_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn test_log_returns_concatenate_runs() {
        let s = PriceSeries::daily(vec![100.0, 102.0, 99.0, f64::NAN, 98.0, 97.5, 99.0]).unwrap();
        let mut expected = statistics::log_returns(&[100.0, 102.0, 99.0]);
        expected.extend(statistics::log_returns(&[98.0, 97.5, 99.0]));
        assert_eq!(s.log_returns(), expected);
    }

    #[test]
    fn test_last_present_skips_trailing_missing() {
        let s = PriceSeries::daily(vec![100.0, 101.5, f64::NAN]).unwrap();
        assert_eq!(s.last_present(), Some(101.5));
    }
}
