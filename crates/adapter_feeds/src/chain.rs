//! Listed option chain: expirations and strikes per side.

use std::collections::BTreeMap;

use pricer_core::types::Date;
use pricer_models::instruments::OptionType;
use serde::Serialize;

/// Strikes listed for one expiration, ascending and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpirySlice {
    /// Call strikes
    pub calls: Vec<f64>,
    /// Put strikes
    pub puts: Vec<f64>,
}

impl ExpirySlice {
    /// Strikes for one side of the slice.
    pub fn strikes(&self, option_type: OptionType) -> &[f64] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    fn insert(&mut self, option_type: OptionType, strike: f64) {
        let side = match option_type {
            OptionType::Call => &mut self.calls,
            OptionType::Put => &mut self.puts,
        };
        if let Err(pos) = side.binary_search_by(|k| k.total_cmp(&strike)) {
            side.insert(pos, strike);
        }
    }
}

/// Option chain keyed by expiration date, earliest first.
///
/// # Examples
/// ```
/// use adapter_feeds::OptionChain;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::OptionType;
///
/// let expiry = Date::from_ymd(2025, 3, 21).unwrap();
/// let mut chain = OptionChain::new();
/// chain.insert(expiry, OptionType::Call, 105.0);
/// chain.insert(expiry, OptionType::Call, 95.0);
/// chain.insert(expiry, OptionType::Call, 105.0);
///
/// assert_eq!(chain.expirations(), vec![expiry]);
/// assert_eq!(chain.strikes(&expiry, OptionType::Call), &[95.0, 105.0]);
/// assert!(chain.strikes(&expiry, OptionType::Put).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptionChain {
    slices: BTreeMap<Date, ExpirySlice>,
}

impl OptionChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listed strike. Duplicates are ignored.
    ///
    /// Strikes are expected positive and finite; providers validate them
    /// before insertion.
    pub fn insert(&mut self, expiry: Date, option_type: OptionType, strike: f64) {
        self.slices
            .entry(expiry)
            .or_default()
            .insert(option_type, strike);
    }

    /// Expiration dates in ascending order.
    pub fn expirations(&self) -> Vec<Date> {
        self.slices.keys().copied().collect()
    }

    /// The slice for one expiration.
    pub fn slice(&self, expiry: &Date) -> Option<&ExpirySlice> {
        self.slices.get(expiry)
    }

    /// Strikes for one expiration and side; empty if the expiry is not listed.
    pub fn strikes(&self, expiry: &Date, option_type: OptionType) -> &[f64] {
        self.slices
            .get(expiry)
            .map(|s| s.strikes(option_type))
            .unwrap_or(&[])
    }

    /// Iterates over `(expiry, slice)` pairs, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = (&Date, &ExpirySlice)> {
        self.slices.iter()
    }

    /// Number of expirations.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// True if no expiration is listed.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
