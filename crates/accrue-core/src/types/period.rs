//! Inclusive date ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{AccrueError, AccrueResult};

/// A closed range of dates, `first..=last`.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::{Date, Period};
///
/// let year: Period = "2023".parse().unwrap();
/// assert_eq!(year.first(), Date::from_ymd(2023, 1, 1).unwrap());
/// assert!(year.contains(Date::from_ymd(2023, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    first: Date,
    last: Date,
}

impl Period {
    /// Creates a period from its first and last dates.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidPeriod` if `last` is before `first`.
    pub fn new(first: Date, last: Date) -> AccrueResult<Self> {
        if last < first {
            return Err(AccrueError::InvalidPeriod {
                first: first.to_string(),
                last: last.to_string(),
            });
        }
        Ok(Self { first, last })
    }

    /// The calendar year `year`, January 1 through December 31.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the year is out of range.
    pub fn year(year: i32) -> AccrueResult<Self> {
        Self::new(Date::from_ymd(year, 1, 1)?, Date::from_ymd(year, 12, 31)?)
    }

    /// First date of the period.
    #[must_use]
    pub fn first(&self) -> Date {
        self.first
    }

    /// Last date of the period.
    #[must_use]
    pub fn last(&self) -> Date {
        self.last
    }

    /// Checks if `date` falls inside the period, bounds included.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.first <= date && date <= self.last
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.first, self.last)
    }
}

/// Accepts a bare year (`"2023"`) or two ISO dates (`"2023-01-01..2023-06-30"`).
impl FromStr for Period {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((first, last)) = s.split_once("..") {
            return Self::new(Date::parse(first)?, Date::parse(last)?);
        }
        s.parse::<i32>()
            .map_err(|_| AccrueError::invalid_date(format!("Cannot parse period: {s}")))
            .and_then(Self::year)
    }
}
