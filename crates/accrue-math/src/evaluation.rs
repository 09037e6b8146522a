//! Real-or-not results of rate-dependent formulas.
//!
//! Compounding at a fractional number of periods raises the growth factor
//! to a non-integer power. When the factor is negative (a rate below the
//! compounding floor) the result is a complex number, which has no meaning
//! as a money amount. Formulas report that case as [`Evaluation::Complex`]
//! so root finders can branch on it instead of inspecting floats.

use std::iter::Sum;
use std::ops::Add;

/// Outcome of evaluating a formula at some rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// An ordinary real value (possibly infinite).
    Real(f64),
    /// Not a number, e.g. `0/0` or `inf - inf`.
    Undefined,
    /// A negative base raised to a fractional power.
    Complex,
}

impl Evaluation {
    /// Wraps a float, mapping `NaN` to [`Evaluation::Undefined`].
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value.is_nan() {
            Evaluation::Undefined
        } else {
            Evaluation::Real(value)
        }
    }

    /// `base` raised to `exponent`, flagging complex results.
    ///
    /// ```rust
    /// use accrue_math::Evaluation;
    ///
    /// assert_eq!(Evaluation::power(1.1, 2.0), Evaluation::Real(1.1_f64.powf(2.0)));
    /// assert_eq!(Evaluation::power(-0.5, 2.0), Evaluation::Real(0.25));
    /// assert_eq!(Evaluation::power(-0.5, 2.125), Evaluation::Complex);
    /// ```
    #[must_use]
    pub fn power(base: f64, exponent: f64) -> Self {
        if base < 0.0 && exponent.fract() != 0.0 {
            Evaluation::Complex
        } else {
            Self::of(base.powf(exponent))
        }
    }

    /// Applies `f` to a real value; other states pass through.
    #[must_use]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Evaluation::Real(value) => Self::of(f(value)),
            other => other,
        }
    }

    /// Returns the value if real.
    #[must_use]
    pub fn real(self) -> Option<f64> {
        match self {
            Evaluation::Real(value) => Some(value),
            Evaluation::Undefined | Evaluation::Complex => None,
        }
    }

    /// Returns the value if real, `NaN` otherwise.
    #[must_use]
    pub fn value(self) -> f64 {
        self.real().unwrap_or(f64::NAN)
    }

    /// Returns true for [`Evaluation::Complex`].
    #[must_use]
    pub fn is_complex(self) -> bool {
        matches!(self, Evaluation::Complex)
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Evaluation::Real(0.0)
    }
}

impl From<f64> for Evaluation {
    fn from(value: f64) -> Self {
        Self::of(value)
    }
}

/// Complex dominates undefined, which dominates real.
impl Add for Evaluation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Evaluation::Complex, _) | (_, Evaluation::Complex) => Evaluation::Complex,
            (Evaluation::Undefined, _) | (_, Evaluation::Undefined) => Evaluation::Undefined,
            (Evaluation::Real(a), Evaluation::Real(b)) => Self::of(a + b),
        }
    }
}

impl Sum for Evaluation {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Evaluation::default(), Add::add)
    }
}
