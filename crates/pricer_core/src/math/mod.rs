//! Numerical building blocks shared by the pricing models.
//!
//! - [`statistics`]: log returns and unbiased sample moments

pub mod statistics;
