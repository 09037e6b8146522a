//! Accrued interest.

use accrue_core::daycounts::{AccrualRules, DayCountConvention};
use accrue_core::types::Date;

use crate::bond::Bond;
use crate::error::BondResult;

impl Bond {
    /// Fraction of a year's coupon earned from the prior coupon date to
    /// `settle` under `convention`.
    ///
    /// The bond's end-of-month flag feeds the 30/360 US rules and its
    /// maturity the European 30/360 February exception.
    pub fn accrual_factor(&self, settle: Date, convention: DayCountConvention) -> BondResult<f64> {
        let prior = self.prior_coupon_date(settle)?;
        let day_count = convention.to_day_count(AccrualRules::new(self.end_of_month(), self.maturity()));
        Ok(day_count.year_fraction(prior, settle))
    }

    /// Interest owed to the seller at `settle`: `face * coupon * factor`.
    pub fn accrued_interest(&self, settle: Date, convention: DayCountConvention) -> BondResult<f64> {
        Ok(self.annual_coupon() * self.accrual_factor(settle, convention)?)
    }
}
