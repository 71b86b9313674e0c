//! # Pricer Models (L2: Business Logic)
//!
//! European option valuation and historical volatility estimation.
//!
//! This crate provides:
//! - Option contract definitions ([`instruments`])
//! - The Black-Scholes closed form with an injected normal CDF ([`analytical`])
//! - Close-to-close historical volatility over gappy price series ([`volatility`])
//!
//! ## Design Principles
//!
//! - **Validated construction**: out-of-domain inputs fail when parameters are built
//! - **Pure functions**: no I/O, no logging, no shared state
//! - **Degenerate inputs priced, not rejected**: σ <= 0 or T <= 0 yield intrinsic value
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::{OptionParameters, OptionType};
//! use pricer_models::volatility::HistoricalVolatility;
//!
//! let closes = [100.0, 101.2, 100.4, 102.0, 101.1, 103.3];
//! let vol = HistoricalVolatility::default().estimate(&closes).unwrap();
//!
//! let params = OptionParameters::new(103.3, 100.0, 0.25, 0.045, vol, OptionType::Call).unwrap();
//! let value = BlackScholes::new().price(&params);
//! assert!(value >= params.intrinsic_value());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod volatility;
