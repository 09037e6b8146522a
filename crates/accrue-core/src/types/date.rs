//! Date type for time-value calculations.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{AccrueError, AccrueResult};

/// Day 0 of the spreadsheet serial numbering.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Last serial affected by the fictitious 1900-02-29.
const EXCEL_PHANTOM_LEAP_SERIAL: i64 = 60;

/// A calendar date.
///
/// Newtype around `chrono::NaiveDate` carrying the month arithmetic the
/// valuation code relies on.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::Date;
///
/// let later = Date::from_ymd(2017, 11, 15).unwrap();
/// let earlier = Date::from_ymd(2016, 9, 15).unwrap();
/// assert_eq!(later.month_diff(&earlier), 14.0);
/// assert_eq!(earlier.month_diff(&later), -14.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AccrueResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| AccrueError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> AccrueResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| AccrueError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Converts a spreadsheet serial day number to a date.
    ///
    /// Serials count days from 1899-12-30. Spreadsheets inherited a
    /// non-existent 1900-02-29 at serial 60, so serials up to and including
    /// 60 are shifted forward one day to land on the real calendar.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` for negative serials or serials
    /// beyond the supported date range.
    pub fn from_excel_serial(serial: i64) -> AccrueResult<Self> {
        let offset = u64::try_from(serial)
            .map_err(|_| AccrueError::invalid_date(format!("negative serial {serial}")))?;
        let offset = if serial <= EXCEL_PHANTOM_LEAP_SERIAL {
            offset + 1
        } else {
            offset
        };

        let (y, m, d) = EXCEL_EPOCH;
        Self::from_ymd(y, m, d)?
            .0
            .checked_add_days(Days::new(offset))
            .map(Date)
            .ok_or_else(|| AccrueError::invalid_date(format!("serial {serial} out of range")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date; negative `days` go back.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the result is out of range.
    pub fn add_days(&self, days: i64) -> AccrueResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| AccrueError::invalid_date(format!("{self} + {days} days is out of range")))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> AccrueResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));
        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date, rolling Feb 29 back to Feb 28.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> AccrueResult<Self> {
        let new_year = self.year() + years;
        let new_day = self.day().min(days_in_month(new_year, self.month()));
        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.0
            .with_day(self.days_in_month())
            .map_or(*self, Date)
    }

    /// Checks if the date is the last day of its month.
    ///
    /// February ends on the 29th in leap years and on the 28th otherwise.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Checks if the date is the last day of February.
    #[must_use]
    pub fn is_last_of_february(&self) -> bool {
        self.month() == 2 && self.is_end_of_month()
    }

    /// Signed number of months from `other` to `self`, with fractional days.
    ///
    /// Positive when `self` is the later date. The day difference counts
    /// as thirtieths of a month, so this is a 30/360 style approximation
    /// rather than an exact calendar measure. When both dates fall on the
    /// last day of their months the result is a whole number.
    #[must_use]
    pub fn month_diff(&self, other: &Date) -> f64 {
        self.months_between(other, false)
    }

    /// Like [`Date::month_diff`], but ignores the day of month entirely.
    #[must_use]
    pub fn whole_month_diff(&self, other: &Date) -> f64 {
        self.months_between(other, true)
    }

    fn months_between(&self, other: &Date, whole: bool) -> f64 {
        let (earlier, later, sign) = if self < other {
            (self, other, -1.0)
        } else {
            (other, self, 1.0)
        };
        let whole = whole || (earlier.is_end_of_month() && later.is_end_of_month());

        let mut months = f64::from(
            (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32,
        );
        if !whole {
            months += (f64::from(later.day()) - f64::from(earlier.day())) / 30.0;
        }
        sign * months
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Date {
    type Error = AccrueError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Number of days in `month` of `year`; 0 for a month outside 1-12.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Gregorian leap year rule.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
