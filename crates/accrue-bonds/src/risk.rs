//! Duration measures.

use accrue_core::daycounts::DayCountConvention;
use accrue_core::types::{Compounding, Date};
use accrue_flows::CashPoint;

use crate::bond::Bond;
use crate::error::BondResult;

/// Macaulay and modified duration at one yield and settlement date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationResult {
    /// Macaulay duration (in years).
    pub macaulay: f64,
    /// Modified duration.
    pub modified: f64,
}

impl Bond {
    /// Macaulay duration: the present-value weighted average time, in
    /// years, to each remaining coupon and the face, divided by the price.
    ///
    /// A zero-coupon bond's duration is simply its remaining life.
    ///
    /// # Errors
    ///
    /// Same as [`Bond::price`].
    pub fn macaulay_duration(
        &self,
        yld: f64,
        settle: Date,
        convention: DayCountConvention,
    ) -> BondResult<f64> {
        let price = self.price(yld, settle, convention)?;
        let to_maturity = self.maturity().month_diff(&settle) / 12.0;
        if self.coupon_rate() == 0.0 {
            return Ok(to_maturity);
        }

        let compounding = Compounding::Discrete(self.frequency());
        let present_value = |amount: f64, paid: Date| -> BondResult<f64> {
            Ok(CashPoint::new(amount, paid)?.value_on(settle, yld, compounding))
        };

        let mut moment = 0.0;
        for paid in self.remaining_coupon_dates(settle)? {
            let years = paid.month_diff(&settle) / 12.0;
            moment += years * present_value(self.coupon_payment(), paid)?;
        }
        moment += to_maturity * present_value(self.face(), self.maturity())?;

        Ok(moment / price)
    }

    /// Modified duration: Macaulay duration over `1 + yield / frequency`.
    pub fn modified_duration(
        &self,
        yld: f64,
        settle: Date,
        convention: DayCountConvention,
    ) -> BondResult<f64> {
        Ok(self.duration(yld, settle, convention)?.modified)
    }

    /// Both durations from a single pass.
    pub fn duration(
        &self,
        yld: f64,
        settle: Date,
        convention: DayCountConvention,
    ) -> BondResult<DurationResult> {
        let macaulay = self.macaulay_duration(yld, settle, convention)?;
        let periods = f64::from(self.frequency().periods_per_year());
        Ok(DurationResult {
            macaulay,
            modified: macaulay / (1.0 + yld / periods),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::types::Frequency;
    use approx::assert_abs_diff_eq;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_annual_bond() {
        let bond = Bond::builder()
            .maturity(d("2010-07-01"))
            .coupon_rate(0.05)
            .frequency(Frequency::Annual)
            .build()
            .unwrap();
        let result = bond
            .duration(0.05, d("2005-07-01"), DayCountConvention::Thirty360US)
            .unwrap();
        assert_abs_diff_eq!(result.macaulay, 4.546, epsilon = 1e-3);
        assert_abs_diff_eq!(result.modified, 4.3295, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_coupon_is_remaining_life() {
        let bond = Bond::builder()
            .maturity(d("2010-07-01"))
            .coupon_rate(0.0)
            .build()
            .unwrap();
        let settle = d("2005-10-01");
        let mac = bond
            .macaulay_duration(0.06, settle, DayCountConvention::Actual365)
            .unwrap();
        assert_abs_diff_eq!(mac, 4.75, epsilon = 1e-12);
        let modified = bond
            .modified_duration(0.06, settle, DayCountConvention::Actual365)
            .unwrap();
        assert_abs_diff_eq!(modified, 4.75 / 1.03, epsilon = 1e-12);
    }

    #[test]
    fn test_duration_shorter_than_life() {
        let bond = Bond::builder()
            .maturity(d("2016-01-01"))
            .coupon_rate(0.08)
            .face(100.0)
            .build()
            .unwrap();
        let mac = bond
            .macaulay_duration(0.09, d("2008-01-01"), DayCountConvention::Thirty360US)
            .unwrap();
        assert!(mac > 0.0 && mac < 8.0);
    }

    #[test]
    fn test_duration_checks_inputs() {
        let bond = Bond::builder()
            .maturity(d("2016-01-01"))
            .coupon_rate(0.08)
            .build()
            .unwrap();
        assert!(bond
            .macaulay_duration(9.0, d("2008-01-01"), DayCountConvention::Thirty360US)
            .is_err());
        assert!(bond
            .modified_duration(0.09, d("2016-01-01"), DayCountConvention::Thirty360US)
            .is_err());
    }
}
