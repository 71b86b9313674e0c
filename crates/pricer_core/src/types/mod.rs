//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing, estimation and date parsing
//! - `time`: `Date` wrapper and ACT/365 time-to-expiry
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`time_to_expiry`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use time::{time_to_expiry, Date};
