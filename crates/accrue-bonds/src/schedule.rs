//! Coupon dates.
//!
//! Coupon dates are counted back from maturity in steps of
//! `12 / frequency` months. Index `0` is maturity, index `1` the coupon
//! before it, and negative indices continue past maturity so that
//! [`Bond::next_coupon_date`] is defined for any date.

use accrue_core::types::Date;

use crate::bond::Bond;
use crate::error::BondResult;

impl Bond {
    /// The `k`-th coupon date before maturity.
    ///
    /// Days past the end of a shorter month roll back to its last day; with
    /// end-of-month set, every coupon date falls on a month end.
    pub fn coupon_date(&self, k: i32) -> BondResult<Date> {
        let months = self.months_per_period() * k;
        let date = self.maturity().add_months(-months)?;
        Ok(if self.end_of_month() {
            date.end_of_month()
        } else {
            date
        })
    }

    /// Index of the first coupon date strictly after `date`.
    pub(crate) fn next_coupon_index(&self, date: Date) -> BondResult<i32> {
        let periods = self.maturity().month_diff(&date) / f64::from(self.months_per_period());
        let mut k = periods.floor() as i32;
        while self.coupon_date(k)? <= date {
            k -= 1;
        }
        while self.coupon_date(k + 1)? > date {
            k += 1;
        }
        Ok(k)
    }

    /// First coupon date strictly after `date`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use accrue_bonds::Bond;
    /// use accrue_core::types::Date;
    ///
    /// let bond = Bond::builder()
    ///     .maturity(Date::parse("2017-11-15").unwrap())
    ///     .coupon_rate(0.0575)
    ///     .build()
    ///     .unwrap();
    ///
    /// let settle = Date::parse("2008-02-15").unwrap();
    /// assert_eq!(bond.next_coupon_date(settle).unwrap(), Date::parse("2008-05-15").unwrap());
    /// assert_eq!(bond.prior_coupon_date(settle).unwrap(), Date::parse("2007-11-15").unwrap());
    /// ```
    pub fn next_coupon_date(&self, date: Date) -> BondResult<Date> {
        self.coupon_date(self.next_coupon_index(date)?)
    }

    /// Last coupon date on or before `date`.
    pub fn prior_coupon_date(&self, date: Date) -> BondResult<Date> {
        self.coupon_date(self.next_coupon_index(date)? + 1)
    }

    /// Coupon dates strictly after `settle` up to and including maturity,
    /// in date order. Empty once `settle` reaches maturity.
    pub fn remaining_coupon_dates(&self, settle: Date) -> BondResult<Vec<Date>> {
        let next = self.next_coupon_index(settle)?;
        (0..=next).rev().map(|k| self.coupon_date(k)).collect()
    }

    fn months_per_period(&self) -> i32 {
        self.frequency().months_per_period() as i32
    }
}
