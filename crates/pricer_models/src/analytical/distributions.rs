//! Standard normal cumulative distribution function.
//!
//! The Black-Scholes engine takes its CDF as an injected [`NormalCdf`]
//! capability so that its correctness can be checked against an independent
//! reference. Two double-precision implementations are provided:
//!
//! - [`ErfcNormal`] (default): `Φ(x) = ½·erfc(−x/√2)` using `statrs`'s `erfc`
//! - [`HartNormal`]: Hart (1968) rational approximation as reformulated by
//!   West (2005), with no numeric-library dependency
//!
//! Both agree with each other to within a few ulps on `[-10, 10]`.

use statrs::function::erf::erfc;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the Hart tail underflows to exactly 0 (or 1).
const HART_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued-fraction branches (10/√2).
const HART_SWITCH: f64 = 7.071_067_811_865_47;

/// Standard normal cumulative distribution function capability.
///
/// Implementations must be pure and return `P(X <= x)` for `X ~ N(0, 1)`,
/// accurate to at least 1e-9 absolute error on `[-10, 10]`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::{ErfcNormal, HartNormal, NormalCdf};
///
/// let x = 0.35;
/// assert!((ErfcNormal.cdf(x) - HartNormal.cdf(x)).abs() < 1e-12);
/// ```
pub trait NormalCdf: Send + Sync {
    /// Returns Φ(x).
    fn cdf(&self, x: f64) -> f64;
}

/// Normal CDF via the complementary error function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErfcNormal;

impl NormalCdf for ErfcNormal {
    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        // Φ(x) = 0.5 * erfc(-x / sqrt(2)); erfc keeps full relative precision in the left tail
        0.5 * erfc(-x / SQRT_2)
    }
}

/// Normal CDF via Hart's double-precision rational approximation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HartNormal;

impl NormalCdf for HartNormal {
    fn cdf(&self, x: f64) -> f64 {
        let abs_x = x.abs();

        // Lower-tail mass Φ(-|x|)
        let tail = if abs_x > HART_CUTOFF {
            0.0
        } else {
            let exponential = (-abs_x * abs_x / 2.0).exp();
            if abs_x < HART_SWITCH {
                let mut num = 3.526_249_659_989_11e-2 * abs_x + 0.700_383_064_443_688;
                num = num * abs_x + 6.373_962_203_531_65;
                num = num * abs_x + 33.912_866_078_383;
                num = num * abs_x + 112.079_291_497_871;
                num = num * abs_x + 221.213_596_169_931;
                num = num * abs_x + 220.206_867_912_376;

                let mut den = 8.838_834_764_831_84e-2 * abs_x + 1.755_667_163_182_64;
                den = den * abs_x + 16.064_177_579_207;
                den = den * abs_x + 86.780_732_202_946_1;
                den = den * abs_x + 296.564_248_779_674;
                den = den * abs_x + 637.333_633_378_831;
                den = den * abs_x + 793.826_512_519_948;
                den = den * abs_x + 440.413_735_824_752;

                exponential * num / den
            } else {
                // Continued fraction for the far tail
                let mut cf = abs_x + 0.65;
                cf = abs_x + 4.0 / cf;
                cf = abs_x + 3.0 / cf;
                cf = abs_x + 2.0 / cf;
                cf = abs_x + 1.0 / cf;
                exponential / cf / SQRT_2PI
            }
        };

        if x > 0.0 {
            1.0 - tail
        } else {
            tail
        }
    }
}

/// Standard normal CDF using the default implementation ([`ErfcNormal`]).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-13);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    ErfcNormal.cdf(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Reference values Φ(x) to 16 significant digits.
    const REFERENCE: [(f64, f64); 9] = [
        (0.0, 0.5),
        (1.0, 0.841_344_746_068_542_9),
        (-1.0, 0.158_655_253_931_457_07),
        (2.0, 0.977_249_868_051_820_8),
        (-2.0, 0.022_750_131_948_179_22),
        (3.0, 0.998_650_101_968_369_9),
        (0.35, 0.636_830_651_175_619),
        (-5.0, 2.866_515_718_791_946e-7),
        (-10.0, 7.619_853_024_160_593e-24),
    ];

    // ==========================================================
    // Reference values
    // ==========================================================

    #[test]
    fn test_erfc_normal_reference_values() {
        for (x, expected) in REFERENCE {
            assert_abs_diff_eq!(ErfcNormal.cdf(x), expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_hart_normal_reference_values() {
        for (x, expected) in REFERENCE {
            assert_abs_diff_eq!(HartNormal.cdf(x), expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_norm_cdf_is_erfc_normal() {
        for (x, _) in REFERENCE {
            assert_eq!(norm_cdf(x), ErfcNormal.cdf(x));
        }
    }

    // ==========================================================
    // Cross-implementation agreement
    // ==========================================================

    #[test]
    fn test_implementations_agree_on_practical_range() {
        // Grid over [-10, 10] with step 0.005
        for i in -2000..=2000 {
            let x = i as f64 * 0.005;
            let diff = (ErfcNormal.cdf(x) - HartNormal.cdf(x)).abs();
            assert!(diff < 1e-9, "Φ({}) differs by {}", x, diff);
        }
    }

    // ==========================================================
    // Shape properties
    // ==========================================================

    #[test]
    fn test_symmetry() {
        for i in -100..=100 {
            let x = i as f64 * 0.1;
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
            assert_abs_diff_eq!(HartNormal.cdf(x) + HartNormal.cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let cdfs: [&dyn NormalCdf; 2] = [&ErfcNormal, &HartNormal];
        let values: Vec<f64> = (-80..=80).map(|i| i as f64 * 0.1).collect();
        for w in values.windows(2) {
            for cdf in cdfs {
                let a = cdf.cdf(w[0]);
                let b = cdf.cdf(w[1]);
                assert!(b > a, "CDF not monotonic at x = {}", w[0]);
                assert!((0.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn test_extreme_tails() {
        assert_eq!(HartNormal.cdf(-40.0), 0.0);
        assert_eq!(HartNormal.cdf(40.0), 1.0);
        assert!(ErfcNormal.cdf(-40.0) >= 0.0);
        assert_eq!(ErfcNormal.cdf(40.0), 1.0);
    }

    #[test]
    fn test_object_safety() {
        let boxed: Box<dyn NormalCdf> = Box::new(HartNormal);
        assert_abs_diff_eq!(boxed.cdf(0.0), 0.5, epsilon = 1e-15);
    }
}
