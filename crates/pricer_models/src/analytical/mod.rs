//! Analytical pricing formulas for European options.
//!
//! - [`BlackScholes`]: closed-form engine, generic over its [`NormalCdf`]
//! - [`price`]: one-shot pricing from raw inputs
//!
//! ## Design Principles
//!
//! - **Injected CDF**: the normal CDF is a trait capability, so the engine can
//!   be cross-checked against an independent approximation
//! - **Intrinsic before closed form**: σ <= 0 or T <= 0 never reach σ√T

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{price, BlackScholes};
pub use distributions::{norm_cdf, ErfcNormal, HartNormal, NormalCdf};
