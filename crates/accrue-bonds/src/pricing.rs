//! Price and yield to maturity.
//!
//! Prices are clean: the discounted coupons and face, less the interest
//! accrued since the prior coupon. Between settlement and the next coupon
//! date discounting is simple interest at the annual yield; from the next
//! coupon date on it compounds at the coupon frequency.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use accrue_core::daycounts::DayCountConvention;
use accrue_core::types::{Compounding, Date};
use accrue_flows::CashPoint;
use accrue_math::annuity_present_value;
use accrue_math::solvers::bisection_rounded;
use accrue_math::MathError;

use crate::bond::Bond;
use crate::error::{BondError, BondResult};

/// Settings for the yield search in [`Bond::yield_to_maturity_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldConfig {
    /// Decimal places at which the bracket ends must agree.
    pub decimal_places: u32,
    /// Maximum bisection steps.
    pub max_iterations: u32,
    /// Lowest yield searched.
    pub lower: f64,
    /// Highest yield searched.
    pub upper: f64,
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            decimal_places: 7,
            max_iterations: 50,
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl Bond {
    pub(crate) fn check_settlement(&self, settle: Date) -> BondResult<()> {
        if settle >= self.maturity() {
            return Err(BondError::SettlementAfterMaturity {
                settlement: settle.to_string(),
                maturity: self.maturity().to_string(),
            });
        }
        Ok(())
    }

    /// Clean price at yield `yld` for settlement on `settle`.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidYield` if `yld` is outside `[0, 1]`
    /// - `BondError::SettlementAfterMaturity` if `settle` is not before maturity
    ///
    /// # Example
    ///
    /// ```rust
    /// use accrue_bonds::Bond;
    /// use accrue_core::daycounts::DayCountConvention;
    /// use accrue_core::types::Date;
    ///
    /// let bond = Bond::builder()
    ///     .maturity(Date::parse("2017-11-15").unwrap())
    ///     .coupon_rate(0.0575)
    ///     .face(100.0)
    ///     .build()
    ///     .unwrap();
    ///
    /// let settle = Date::parse("2008-02-15").unwrap();
    /// let price = bond.price(0.065, settle, DayCountConvention::Thirty360US).unwrap();
    /// assert!((price - 94.6221).abs() < 0.01);
    /// ```
    pub fn price(&self, yld: f64, settle: Date, convention: DayCountConvention) -> BondResult<f64> {
        if !(0.0..=1.0).contains(&yld) {
            return Err(BondError::InvalidYield { value: yld });
        }
        self.check_settlement(settle)?;

        let frequency = self.frequency();
        let per_period = yld / f64::from(frequency.periods_per_year());
        let coupon = self.coupon_payment();

        let k = self.next_coupon_index(settle)?;
        let next = self.coupon_date(k)?;
        // Settlement precedes maturity, so the next coupon is at or before it
        let remaining = u32::try_from(k).unwrap_or(0);

        let coupons_at_next = annuity_present_value(remaining, coupon, per_period) + coupon;
        let coupons = CashPoint::new(coupons_at_next, next)?.value_on(settle, yld, Compounding::Simple);

        let face_at_next = CashPoint::new(self.face(), self.maturity())?.value_on(
            next,
            yld,
            Compounding::Discrete(frequency),
        );
        let face = CashPoint::new(face_at_next, next)?.value_on(settle, yld, Compounding::Simple);

        Ok(coupons + face - self.accrued_interest(settle, convention)?)
    }

    /// Yield at which [`Bond::price`] equals `price`, with the default
    /// [`YieldConfig`].
    pub fn yield_to_maturity(
        &self,
        price: f64,
        settle: Date,
        convention: DayCountConvention,
    ) -> BondResult<f64> {
        self.yield_to_maturity_with(price, settle, convention, &YieldConfig::default())
    }

    /// Yield at which [`Bond::price`] equals `price`.
    ///
    /// Bisects over `[config.lower, config.upper]` until both ends agree to
    /// `config.decimal_places`. `NaN` when `price` is not reachable by any
    /// yield in that range.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidPrice` if `price` is negative or not finite
    /// - `BondError::SettlementAfterMaturity` if `settle` is not before maturity
    pub fn yield_to_maturity_with(
        &self,
        price: f64,
        settle: Date,
        convention: DayCountConvention,
        config: &YieldConfig,
    ) -> BondResult<f64> {
        if !(price >= 0.0 && price.is_finite()) {
            return Err(BondError::invalid_price(format!(
                "{price} must be a non-negative amount"
            )));
        }
        self.check_settlement(settle)?;

        let excess = |yld: f64| {
            self.price(yld, settle, convention)
                .map_or(f64::NAN, |p| p - price)
        };

        match bisection_rounded(
            excess,
            config.lower,
            config.upper,
            config.decimal_places,
            config.max_iterations,
        ) {
            Ok(result) => {
                debug!(
                    "yield for {price} at {settle}: {} after {} steps",
                    result.root, result.iterations
                );
                Ok(result.root)
            }
            Err(MathError::InvalidBracket { fa, fb, .. }) => {
                debug!("price {price} outside [{}, {}]", fb + price, fa + price);
                Ok(f64::NAN)
            }
            Err(err @ MathError::ConvergenceFailed { .. }) => {
                warn!("yield for {price} at {settle}: {err}");
                Ok(f64::NAN)
            }
            Err(err) => Err(err.into()),
        }
    }
}
