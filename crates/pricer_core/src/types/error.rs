//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from option pricing and volatility estimation
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure of the pricing engine and the volatility estimator is one of
/// these variants. None of them is transient: the same input always fails the
/// same way, so callers must fix the input rather than retry.
///
/// # Variants
/// - `InvalidArgument`: Malformed or out-of-domain input (bad option type, non-positive spot)
/// - `NoData`: A data source returned nothing (empty series, unknown symbol)
/// - `InsufficientData`: Data present but too little for the statistic requested
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("spot must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid argument: spot must be positive");
///
/// let err = PricingError::InsufficientData { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient data: got 1, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Malformed or out-of-domain input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The data source returned nothing usable.
    #[error("No data: {0}")]
    NoData(String),

    /// Too few usable observations for the requested statistic.
    #[error("Insufficient data: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of usable observations
        got: usize,
        /// Minimum number required
        need: usize,
    },
}

impl PricingError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a no data error
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = PricingError::invalid_argument("option type must be 'call' or 'put'");
        assert_eq!(
            format!("{}", err),
            "Invalid argument: option type must be 'call' or 'put'"
        );
    }

    #[test]
    fn test_no_data_display() {
        let err = PricingError::no_data("no historical data for XYZ");
        assert_eq!(format!("{}", err), "No data: no historical data for XYZ");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = PricingError::InsufficientData { got: 0, need: 2 };
        assert!(format!("{}", err).contains("got 0"));
        assert!(format!("{}", err).contains("at least 2"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::no_data("empty");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = PricingError::InsufficientData { got: 1, need: 2 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, PricingError::no_data("x"));
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("premature end of input".to_string());
        assert_eq!(format!("{}", err), "Date parse error: premature end of input");
    }

    #[test]
    fn test_date_error_to_pricing_error() {
        let err = DateError::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        match PricingError::from(err) {
            PricingError::InvalidArgument(msg) => assert!(msg.contains("2023-2-29")),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }
}
