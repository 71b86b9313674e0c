//! European option contract definitions.
//!
//! - [`OptionType`]: Call or Put, parsed case-insensitively
//! - [`OptionParameters`]: validated spot/strike/expiry/rate/vol bundle
//!
//! # Examples
//!
//! ```
//! use pricer_core::traits::Priceable;
//! use pricer_models::instruments::{OptionParameters, OptionType};
//!
//! let put = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, "put".parse().unwrap()).unwrap();
//! let price = put.price().unwrap();
//! assert!((price - 5.5735).abs() < 1e-3);
//! ```

mod option_type;
mod params;

pub use option_type::OptionType;
pub use params::OptionParameters;
