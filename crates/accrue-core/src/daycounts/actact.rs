//! Actual/Actual day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual day count convention.
///
/// The period is split at each January 1 it crosses. Days falling in a
/// leap year count over 366, days in other years over 365.
///
/// # Example
///
/// 2007-12-15 to 2008-01-10 has 17 days in 2007 and 9 in 2008:
///
/// $$\frac{17}{365} + \frac{9}{366} = 0.07116551$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActualActual;

impl DayCount for ActualActual {
    fn name(&self) -> &'static str {
        "ACT/ACT"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if end < start {
            return -self.year_fraction(end, start);
        }

        let mut total = 0.0;
        let mut current = start;
        while current.year() < end.year() {
            let Ok(next_year) = Date::from_ymd(current.year() + 1, 1, 1) else {
                break;
            };
            total += current.days_between(&next_year) as f64 / f64::from(current.days_in_year());
            current = next_year;
        }
        total + current.days_between(&end) as f64 / f64::from(current.days_in_year())
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
