//! A single dated amount of money.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use accrue_core::types::{Compounding, Date};
use accrue_math::Evaluation;

use crate::error::{FlowError, FlowResult};

/// An amount of money paid or received on a date.
///
/// Positive amounts are inflows, negative amounts outflows. Points order by
/// date first.
///
/// # Example
///
/// ```rust
/// use accrue_core::types::{Compounding, Date};
/// use accrue_flows::CashPoint;
///
/// let point = CashPoint::new(45_000.33, Date::parse("2022-11-16").unwrap()).unwrap();
/// let later = Date::parse("2025-01-01").unwrap();
///
/// // 2.125 years of annual compounding at 10%
/// let value = point.value_on(later, 0.10, Compounding::ANNUAL);
/// assert!((value - 55_102.988_650_1).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCashPoint")]
pub struct CashPoint {
    date: Date,
    amount: f64,
}

/// Unchecked wire form of a [`CashPoint`].
#[derive(Deserialize)]
struct RawCashPoint {
    date: Date,
    amount: f64,
}

impl TryFrom<RawCashPoint> for CashPoint {
    type Error = FlowError;

    fn try_from(raw: RawCashPoint) -> FlowResult<Self> {
        CashPoint::new(raw.amount, raw.date)
    }
}

impl CashPoint {
    /// Creates a cash point.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NonFiniteAmount` if `amount` is NaN or infinite.
    pub fn new(amount: f64, date: Date) -> FlowResult<Self> {
        if !amount.is_finite() {
            return Err(FlowError::NonFiniteAmount {
                amount,
                date: date.to_string(),
            });
        }
        Ok(Self { date, amount })
    }

    /// Creates a cash point from an ISO 8601 date string.
    ///
    /// # Errors
    ///
    /// Returns an error if the date does not parse or the amount is not finite.
    pub fn on(amount: f64, date: &str) -> FlowResult<Self> {
        Self::new(amount, Date::parse(date)?)
    }

    /// A zero payment on `date`.
    pub(crate) fn zero(date: Date) -> Self {
        Self { date, amount: 0.0 }
    }

    /// Returns the date of the payment.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the amount of the payment.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds `other`'s amount into this point if both fall on the same date.
    ///
    /// Returns whether the merge happened.
    pub fn merge(&mut self, other: &CashPoint) -> bool {
        if self.date != other.date {
            return false;
        }
        self.amount += other.amount;
        true
    }

    /// Years from the payment date to `on`, negative when `on` is earlier.
    fn years_until(&self, on: Date) -> f64 {
        on.month_diff(&self.date) / 12.0
    }

    /// Value of the payment on `on`, grown or discounted at `rate`.
    ///
    /// - Continuous: `amount * e^(rate * years)`
    /// - Simple: `amount * (1 + rate * years)` going forward, but
    ///   `amount / (1 + rate * |years|)` going back
    /// - Discrete: `amount * (1 + rate/n)^(years * n)`, which is
    ///   [`Evaluation::Complex`] when the base is negative and the number of
    ///   periods is fractional
    #[must_use]
    pub fn evaluate_on(&self, on: Date, rate: f64, compounding: Compounding) -> Evaluation {
        let years = self.years_until(on);
        match compounding {
            Compounding::Continuous => Evaluation::of(self.amount * (rate * years).exp()),
            Compounding::Simple => {
                if years >= 0.0 {
                    Evaluation::of(self.amount * (1.0 + rate * years))
                } else {
                    Evaluation::of(self.amount / (1.0 + rate * years.abs()))
                }
            }
            Compounding::Discrete(freq) => {
                let n = f64::from(freq.periods_per_year());
                Evaluation::power(1.0 + rate / n, years * n).map(|growth| self.amount * growth)
            }
        }
    }

    /// Like [`CashPoint::evaluate_on`], with `NaN` for non-real results.
    #[must_use]
    pub fn value_on(&self, on: Date, rate: f64, compounding: Compounding) -> f64 {
        self.evaluate_on(on, rate, compounding).value()
    }

    /// Rate sensitivity of [`CashPoint::evaluate_on`], used as the Newton
    /// step denominator when solving for IRR.
    ///
    /// - Continuous: `amount * years * e^(rate * years)`
    /// - Simple: `amount * years` going forward, else
    ///   `-amount * years / (1 + rate * years)^2`
    /// - Discrete: `(periods - 1) * amount * (1 + rate/n)^(periods - 1)`
    #[must_use]
    pub fn derivative_on(&self, on: Date, rate: f64, compounding: Compounding) -> Evaluation {
        let years = self.years_until(on);
        match compounding {
            Compounding::Continuous => {
                Evaluation::of(self.amount * years * (rate * years).exp())
            }
            Compounding::Simple => {
                if years > 0.0 {
                    Evaluation::of(self.amount * years)
                } else {
                    Evaluation::of(-(self.amount * years) / (1.0 + rate * years).powi(2))
                }
            }
            Compounding::Discrete(freq) => {
                let n = f64::from(freq.periods_per_year());
                let periods = years * n;
                Evaluation::power(1.0 + rate / n, periods - 1.0)
                    .map(|growth| (periods - 1.0) * self.amount * growth)
            }
        }
    }

    /// Like [`CashPoint::derivative_on`], with `NaN` for non-real results.
    #[must_use]
    pub fn value_on_prime(&self, on: Date, rate: f64, compounding: Compounding) -> f64 {
        self.derivative_on(on, rate, compounding).value()
    }

    /// Constant annual growth rate that turns `from` into `self`.
    ///
    /// Inverts the compounding formula of [`CashPoint::evaluate_on`]. `NaN`
    /// or infinite when the two points share a date or the amounts have
    /// different signs.
    #[must_use]
    pub fn cagr(&self, from: &CashPoint, compounding: Compounding) -> f64 {
        let years = self.date.month_diff(&from.date) / 12.0;
        let ratio = self.amount / from.amount;
        match compounding {
            Compounding::Continuous => ratio.ln() / years,
            Compounding::Simple => (ratio - 1.0) / years,
            Compounding::Discrete(freq) => {
                let n = f64::from(freq.periods_per_year());
                n * (ratio.powf(1.0 / (n * years)) - 1.0)
            }
        }
    }
}

impl PartialOrd for CashPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.date
                .cmp(&other.date)
                .then(self.amount.total_cmp(&other.amount)),
        )
    }
}

impl fmt::Display for CashPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} @ {}", self.amount, self.date)
    }
}
