//! 30/360 day count conventions.

use super::{thirty360_days, DayCount};
use crate::types::Date;

/// US (NASD) 30/360 day count convention.
///
/// # Rules
///
/// 1. If the security is end-of-month and both D1 and D2 are the last day
///    of February, change D2 to 30
/// 2. If the security is end-of-month and D1 is the last day of February,
///    change D1 to 30
/// 3. If D2 is 31 and D1 is 30 or 31, change D2 to 30
/// 4. If D1 is 31, change D1 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US {
    end_of_month: bool,
}

impl Thirty360US {
    /// Creates the convention for a security with or without end-of-month coupons.
    #[must_use]
    pub fn new(end_of_month: bool) -> Self {
        Self { end_of_month }
    }
}

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day();
        let mut d2 = end.day();

        if self.end_of_month && start.is_last_of_february() {
            if end.is_last_of_february() {
                d2 = 30;
            }
            d1 = 30;
        }
        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }
        if d1 == 31 {
            d1 = 30;
        }

        thirty360_days(start, end, d1, d2)
    }
}

/// European 30/360 day count convention.
///
/// Month-end days on either side count as the 30th, except when the end
/// date is a February maturity date, where both days are used as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360European {
    maturity: Option<Date>,
}

impl Thirty360European {
    /// Creates the convention for an instrument maturing on `maturity`.
    #[must_use]
    pub fn new(maturity: Option<Date>) -> Self {
        Self { maturity }
    }
}

impl DayCount for Thirty360European {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day();
        let mut d2 = end.day();

        let february_maturity = self.maturity == Some(end) && end.month() == 2;
        if !february_maturity {
            if start.is_end_of_month() {
                d1 = 30;
            }
            if end.is_end_of_month() {
                d2 = 30;
            }
        }

        thirty360_days(start, end, d1, d2)
    }
}
