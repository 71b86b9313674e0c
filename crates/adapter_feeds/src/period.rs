//! Look-back windows for historical price requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Length of history requested from a provider.
///
/// # Examples
/// ```
/// use adapter_feeds::HistoryPeriod;
///
/// let p: HistoryPeriod = "6mo".parse().unwrap();
/// assert_eq!(p, HistoryPeriod::SixMonths);
/// assert_eq!(p.trading_days(), 126);
/// assert_eq!(HistoryPeriod::default().to_string(), "1y");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryPeriod {
    /// One month
    #[serde(rename = "1mo")]
    OneMonth,
    /// Three months
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// Six months
    #[serde(rename = "6mo")]
    SixMonths,
    /// One year
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    /// Two years
    #[serde(rename = "2y")]
    TwoYears,
    /// Five years
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryPeriod {
    /// All periods, shortest first.
    pub const ALL: [HistoryPeriod; 6] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::TwoYears,
        HistoryPeriod::FiveYears,
    ];

    /// Short code, as accepted by `FromStr`.
    pub fn code(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::TwoYears => "2y",
            HistoryPeriod::FiveYears => "5y",
        }
    }

    /// Calendar days covered by the window.
    pub fn calendar_days(&self) -> i64 {
        match self {
            HistoryPeriod::OneMonth => 30,
            HistoryPeriod::ThreeMonths => 91,
            HistoryPeriod::SixMonths => 182,
            HistoryPeriod::OneYear => 365,
            HistoryPeriod::TwoYears => 730,
            HistoryPeriod::FiveYears => 1826,
        }
    }

    /// Trading sessions in the window, at 252 per year.
    pub fn trading_days(&self) -> usize {
        match self {
            HistoryPeriod::OneMonth => 21,
            HistoryPeriod::ThreeMonths => 63,
            HistoryPeriod::SixMonths => 126,
            HistoryPeriod::OneYear => 252,
            HistoryPeriod::TwoYears => 504,
            HistoryPeriod::FiveYears => 1260,
        }
    }
}

impl FromStr for HistoryPeriod {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| {
                FeedError::Parse(format!(
                    "unknown history period '{}' (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y)",
                    s
                ))
            })
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
