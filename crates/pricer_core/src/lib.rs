//! # pricer_core: Foundation for the optval Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `PricingError`, `DateError` (`types::error`)
//! - Time types: `Date`, `time_to_expiry` (`types::time`)
//! - Sample statistics over return series (`math::statistics`)
//! - The `Priceable` trait (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! Nothing in this crate performs I/O or logs.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::statistics::{log_returns, sample_std_dev};
//! use pricer_core::types::{time_to_expiry, Date};
//!
//! // ACT/365 year fraction
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 7, 1).unwrap();
//! let t = time_to_expiry(today, expiry);
//! assert!((t - 182.0 / 365.0).abs() < 1e-12);
//!
//! // Sample standard deviation of log returns
//! let returns = log_returns(&[100.0_f64, 101.0, 99.5, 100.2]);
//! let sd = sample_std_dev(&returns).unwrap();
//! assert!(sd > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date` and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
