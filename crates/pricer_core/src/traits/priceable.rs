//! Trait for priceable instruments.

use num_traits::Float;

use crate::types::PricingError;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Design Philosophy
///
/// Use `enum`- or struct-based static dispatch:
///
/// ```
/// use pricer_core::traits::priceable::Priceable;
/// use pricer_core::types::PricingError;
///
/// enum Payoff {
///     Forward { spot: f64, strike: f64 },
///     Cash(f64),
/// }
///
/// impl Priceable<f64> for Payoff {
///     fn price(&self) -> Result<f64, PricingError> {
///         match self {
///             Payoff::Forward { spot, strike } => Ok(spot - strike),
///             Payoff::Cash(amount) if *amount >= 0.0 => Ok(*amount),
///             Payoff::Cash(_) => Err(PricingError::invalid_argument("negative cash")),
///         }
///     }
/// }
///
/// assert_eq!(Payoff::Forward { spot: 105.0, strike: 100.0 }.price(), Ok(5.0));
/// assert!(Payoff::Cash(-1.0).price().is_err());
/// ```
///
/// # Usage in Layer 2
///
/// Implement this trait for instrument types in `pricer_models`.
pub trait Priceable<T: Float> {
    /// Calculate the price of the instrument.
    ///
    /// # Returns
    /// The present value, or the reason the instrument cannot be priced.
    ///
    /// # Invariants
    /// - The method must be pure (no side effects, deterministic)
    fn price(&self) -> Result<T, PricingError>;
}
