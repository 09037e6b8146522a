//! Day count conventions for accrued interest.
//!
//! A day count convention turns the time between two dates into a
//! fraction of a year. Five conventions are supported, identified by the
//! numeric codes used by spreadsheet bond functions:
//!
//! | Code | Convention | Type |
//! |------|------------|------|
//! | 0 | US (NASD) 30/360 | [`Thirty360US`] |
//! | 1 | Actual/Actual, split at the year boundary | [`ActualActual`] |
//! | 2 | Actual/360 | [`Act360`] |
//! | 3 | Actual/365 | [`Act365`] |
//! | 4 | European 30/360 | [`Thirty360European`] |
//!
//! # Usage
//!
//! ```rust
//! use accrue_core::daycounts::{AccrualRules, DayCount, DayCountConvention};
//! use accrue_core::types::Date;
//!
//! let convention = DayCountConvention::try_from(0u8).unwrap();
//! let dc = convention.to_day_count(AccrualRules::default());
//!
//! let start = Date::from_ymd(2007, 11, 15).unwrap();
//! let end = Date::from_ymd(2008, 2, 15).unwrap();
//! assert_eq!(dc.day_count(start, end), 90);
//! assert_eq!(dc.year_fraction(start, end), 0.25);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365;
pub use actact::ActualActual;
pub use thirty360::{Thirty360European, Thirty360US};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccrueError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    ///
    /// Actual conventions count calendar days; 30/360 conventions count
    /// every month as 30 days after adjusting the day of month.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Instrument facts some conventions consult when adjusting dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccrualRules {
    /// Coupons are paid on the last day of the month.
    pub end_of_month: bool,
    /// Final payment date of the instrument.
    pub maturity: Option<Date>,
}

impl AccrualRules {
    /// Rules for an instrument maturing on `maturity`.
    #[must_use]
    pub fn new(end_of_month: bool, maturity: Date) -> Self {
        Self {
            end_of_month,
            maturity: Some(maturity),
        }
    }
}

/// Enumeration of the supported day count conventions.
///
/// The discriminants are the conventional numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DayCountConvention {
    /// US (NASD) 30/360 - US corporate, municipal and agency bonds
    #[default]
    Thirty360US = 0,
    /// Actual/Actual with the period split at the year boundary
    ActualActual = 1,
    /// Actual/360 - money market instruments
    Actual360 = 2,
    /// Actual/365 - fixed 365-day year
    Actual365 = 3,
    /// European 30/360 - Eurobonds
    Thirty360European = 4,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation applying `rules`.
    #[must_use]
    pub fn to_day_count(&self, rules: AccrualRules) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360US => Box::new(Thirty360US::new(rules.end_of_month)),
            DayCountConvention::ActualActual => Box::new(ActualActual),
            DayCountConvention::Actual360 => Box::new(Act360),
            DayCountConvention::Actual365 => Box::new(Act365),
            DayCountConvention::Thirty360European => {
                Box::new(Thirty360European::new(rules.maturity))
            }
        }
    }

    /// Returns the numeric code of the convention.
    #[must_use]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::ActualActual => "ACT/ACT",
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365 => "ACT/365",
            DayCountConvention::Thirty360European => "30E/360",
        }
    }

    /// Returns all available day count conventions in code order.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360US,
            DayCountConvention::ActualActual,
            DayCountConvention::Actual360,
            DayCountConvention::Actual365,
            DayCountConvention::Thirty360European,
        ]
    }
}

impl TryFrom<u8> for DayCountConvention {
    type Error = AccrueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| AccrueError::invalid_day_count(code))
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = AccrueError;

    /// Parses a numeric code ("0".."4") or a common name ("30/360", "ACT/365", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "30/360" | "30/360 US" | "30U/360" | "BOND" | "NASD" => {
                Ok(DayCountConvention::Thirty360US)
            }
            "ACT/ACT" | "ACTUAL/ACTUAL" => Ok(DayCountConvention::ActualActual),
            "ACT/360" | "ACTUAL/360" => Ok(DayCountConvention::Actual360),
            "ACT/365" | "ACTUAL/365" | "ACT/365F" => Ok(DayCountConvention::Actual365),
            "30E/360" | "30/360 EUROPEAN" | "EUROBOND" => Ok(DayCountConvention::Thirty360European),
            other => other
                .parse::<u8>()
                .map_err(|_| AccrueError::invalid_day_count(s))
                .and_then(DayCountConvention::try_from),
        }
    }
}

/// Day count under the 30/360 formula for already-adjusted days of month.
pub(crate) fn thirty360_days(start: Date, end: Date, d1: u32, d2: u32) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + (i64::from(d2) - i64::from(d1))
}
