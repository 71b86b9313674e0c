//! Sample statistics over return series.
//!
//! All functions are generic over `T: Float` and use a two-pass algorithm
//! (mean first, then squared deviations) so that a constant input yields an
//! exact zero dispersion rather than cancellation noise.

use num_traits::Float;

use crate::types::PricingError;

/// Minimum number of observations for an unbiased sample variance.
pub const MIN_VARIANCE_SAMPLES: usize = 2;

#[inline]
fn count<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::infinity)
}

/// Continuously-compounded returns between adjacent prices.
///
/// `r_i = ln(P_i / P_{i-1})`, in input order. Returns an empty vector for
/// fewer than two prices. Prices are assumed positive; missing observations
/// must be handled by the caller before this step.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::log_returns;
///
/// let r = log_returns(&[100.0_f64, 110.0, 99.0]);
/// assert_eq!(r.len(), 2);
/// assert!((r[0] - (1.1_f64).ln()).abs() < 1e-15);
/// ```
pub fn log_returns<T: Float>(prices: &[T]) -> Vec<T> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Arithmetic mean.
///
/// # Errors
/// `PricingError::InsufficientData` if `values` is empty.
pub fn sample_mean<T: Float>(values: &[T]) -> Result<T, PricingError> {
    if values.is_empty() {
        return Err(PricingError::InsufficientData { got: 0, need: 1 });
    }
    let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
    Ok(sum / count(values.len()))
}

/// Unbiased sample variance (divides by `n - 1`).
///
/// # Errors
/// `PricingError::InsufficientData` if fewer than two values are supplied.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::sample_variance;
///
/// let v = sample_variance(&[1.0_f64, 2.0, 3.0, 4.0]).unwrap();
/// assert!((v - 5.0 / 3.0).abs() < 1e-12);
///
/// assert!(sample_variance(&[1.0_f64]).is_err());
/// ```
pub fn sample_variance<T: Float>(values: &[T]) -> Result<T, PricingError> {
    let n = values.len();
    if n < MIN_VARIANCE_SAMPLES {
        return Err(PricingError::InsufficientData {
            got: n,
            need: MIN_VARIANCE_SAMPLES,
        });
    }
    let mean = sample_mean(values)?;
    let ss = values.iter().fold(T::zero(), |acc, &x| {
        let d = x - mean;
        acc + d * d
    });
    Ok(ss / count(n - 1))
}

/// Unbiased sample standard deviation, `sqrt(sample_variance)`.
///
/// # Errors
/// `PricingError::InsufficientData` if fewer than two values are supplied.
pub fn sample_std_dev<T: Float>(values: &[T]) -> Result<T, PricingError> {
    sample_variance(values).map(Float::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_returns_basic() {
        let r = log_returns(&[100.0_f64, 105.0, 100.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], (1.05_f64).ln(), epsilon = 1e-15);
        assert_relative_eq!(r[1], (100.0_f64 / 105.0).ln(), epsilon = 1e-15);
        // Round trip back to the starting price
        assert_relative_eq!(r[0] + r[1], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_log_returns_short_input() {
        assert!(log_returns::<f64>(&[]).is_empty());
        assert!(log_returns(&[42.0_f64]).is_empty());
    }

    #[test]
    fn test_sample_mean() {
        assert_relative_eq!(sample_mean(&[1.0_f64, 2.0, 6.0]).unwrap(), 3.0);
        assert_eq!(
            sample_mean::<f64>(&[]),
            Err(PricingError::InsufficientData { got: 0, need: 1 })
        );
    }

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        // Population variance of [2,4,4,4,5,5,7,9] is 4; sample variance is 32/7
        let xs = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&xs).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(
            sample_std_dev(&xs).unwrap(),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sample_variance_constant_is_exact_zero() {
        let xs = [0.0123_f64; 50];
        assert_eq!(sample_variance(&xs).unwrap(), 0.0);
        assert_eq!(sample_std_dev(&xs).unwrap(), 0.0);
    }

    #[test]
    fn test_sample_variance_insufficient() {
        assert_eq!(
            sample_variance(&[0.01_f64]),
            Err(PricingError::InsufficientData { got: 1, need: 2 })
        );
        assert_eq!(
            sample_std_dev::<f64>(&[]),
            Err(PricingError::InsufficientData { got: 0, need: 2 })
        );
    }

    #[test]
    fn test_f32_compatibility() {
        let sd = sample_std_dev(&[1.0_f32, 3.0]).unwrap();
        assert!((sd - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_variance_non_negative(
                xs in prop::collection::vec(-1.0e3_f64..1.0e3, 2..100)
            ) {
                let v = sample_variance(&xs).unwrap();
                prop_assert!(v >= 0.0);
            }

            #[test]
            fn test_variance_shift_invariant(
                xs in prop::collection::vec(-1.0_f64..1.0, 2..60),
                shift in -10.0_f64..10.0
            ) {
                let shifted: Vec<f64> = xs.iter().map(|x| x + shift).collect();
                let v0 = sample_variance(&xs).unwrap();
                let v1 = sample_variance(&shifted).unwrap();
                prop_assert!((v0 - v1).abs() <= 1e-9 * (1.0 + v0.abs()));
            }
        }
    }
}
