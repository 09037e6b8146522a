//! Fixed coupon bond definition.

use serde::Serialize;
use std::fmt;

use accrue_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Term assumed when only one of issue date and maturity is given.
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Face value when none is given.
pub const DEFAULT_FACE: f64 = 1_000.0;

/// A bullet bond paying a fixed coupon at a regular frequency, with coupon
/// dates anchored on maturity.
///
/// Bonds are immutable once built; every analytic is a pure function of a
/// settlement date and a yield or price.
///
/// # Example
///
/// ```rust
/// use accrue_bonds::Bond;
/// use accrue_core::types::{Date, Frequency};
///
/// let bond = Bond::builder()
///     .maturity(Date::parse("2017-11-15").unwrap())
///     .coupon_rate(0.0575)
///     .face(100.0)
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// // Maturity alone implies a 30-year bond
/// assert_eq!(bond.issue_date(), Date::parse("1987-11-15").unwrap());
/// assert_eq!(bond.term_years(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bond {
    issue_date: Date,
    maturity: Date,
    term_years: f64,
    coupon_rate: f64,
    face: f64,
    frequency: Frequency,
    end_of_month: bool,
}

impl Bond {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date, also the anchor of every coupon date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Life of the bond in years.
    #[must_use]
    pub fn term_years(&self) -> f64 {
        self.term_years
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Face (redemption) value.
    #[must_use]
    pub fn face(&self) -> f64 {
        self.face
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Whether coupon dates stick to month end.
    #[must_use]
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Total coupon paid per year.
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.face * self.coupon_rate
    }

    /// Coupon paid each period.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.annual_coupon() / f64::from(self.frequency.periods_per_year())
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond[{:.2} face, {:.3}% coupon, due {}, {}, issued {}]",
            self.face,
            self.coupon_rate * 100.0,
            self.maturity,
            self.frequency,
            self.issue_date
        )
    }
}

/// Builder for [`Bond`].
///
/// Give any two of issue date, maturity and term; the third is derived by
/// whole-year calendar arithmetic. A lone issue date or maturity implies a
/// term of [`DEFAULT_TERM_YEARS`]. The coupon rate is required.
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    issue_date: Option<Date>,
    maturity: Option<Date>,
    term_years: Option<u32>,
    coupon_rate: Option<f64>,
    face: Option<f64>,
    frequency: Option<Frequency>,
    end_of_month: Option<bool>,
}

impl BondBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the term in whole years.
    #[must_use]
    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    /// Sets the annual coupon rate as a decimal (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the face value (default 1000).
    #[must_use]
    pub fn face(mut self, face: f64) -> Self {
        self.face = Some(face);
        self
    }

    /// Sets the coupon frequency (default semi-annual).
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Snaps coupon dates to month end (default false).
    #[must_use]
    pub fn end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = Some(eom);
        self
    }

    /// Resolves issue date, maturity and term from whichever were given.
    fn defining_dates(&self) -> BondResult<(Date, Date, f64)> {
        let years = |n: u32| i32::try_from(n).map_err(|_| BondError::invalid_spec("term too long"));

        match (self.issue_date, self.maturity, self.term_years) {
            (Some(issue), Some(maturity), Some(term)) => {
                if issue.add_years(years(term)?)? != maturity {
                    return Err(BondError::invalid_spec(format!(
                        "issue {issue} plus {term} years is not maturity {maturity}"
                    )));
                }
                Ok((issue, maturity, f64::from(term)))
            }
            (Some(issue), Some(maturity), None) => {
                let term = if issue.month() == maturity.month() && issue.day() == maturity.day() {
                    f64::from(maturity.year() - issue.year())
                } else {
                    issue.days_between(&maturity) as f64 / 365.25
                };
                Ok((issue, maturity, term))
            }
            (Some(issue), None, term) => {
                let term = term.unwrap_or(DEFAULT_TERM_YEARS);
                Ok((issue, issue.add_years(years(term)?)?, f64::from(term)))
            }
            (None, Some(maturity), term) => {
                let term = term.unwrap_or(DEFAULT_TERM_YEARS);
                Ok((maturity.add_years(-years(term)?)?, maturity, f64::from(term)))
            }
            (None, None, _) => Err(BondError::missing_field("maturity or issue_date")),
        }
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// - `BondError::MissingField` without a coupon rate, or without either
    ///   an issue date or a maturity
    /// - `BondError::InvalidSpec` if the dates disagree, maturity is not
    ///   after issue, the term is outside `(0, 100]`, the coupon rate is
    ///   outside `[0, 1]`, or the face value is not positive
    pub fn build(self) -> BondResult<Bond> {
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;
        let (issue_date, maturity, term_years) = self.defining_dates()?;
        let face = self.face.unwrap_or(DEFAULT_FACE);

        // Validate
        if maturity <= issue_date {
            return Err(BondError::invalid_spec(format!(
                "maturity {maturity} must be after issue {issue_date}"
            )));
        }
        if !(term_years > 0.0 && term_years <= 100.0) {
            return Err(BondError::invalid_spec(format!(
                "term of {term_years} years is not credible"
            )));
        }
        if !(0.0..=1.0).contains(&coupon_rate) {
            return Err(BondError::invalid_spec(format!(
                "coupon rate {coupon_rate} must be a decimal between 0 and 1"
            )));
        }
        if !(face > 0.0 && face.is_finite()) {
            return Err(BondError::invalid_spec(format!("face {face} must be positive")));
        }

        Ok(Bond {
            issue_date,
            maturity,
            term_years,
            coupon_rate,
            face,
            frequency: self.frequency.unwrap_or(Frequency::SemiAnnual),
            end_of_month: self.end_of_month.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_defaults() {
        let bond = Bond::builder()
            .maturity(d("2040-06-15"))
            .coupon_rate(0.04)
            .build()
            .unwrap();
        assert_eq!(bond.face(), 1_000.0);
        assert_eq!(bond.frequency(), Frequency::SemiAnnual);
        assert!(!bond.end_of_month());
        assert_eq!(bond.issue_date(), d("2010-06-15"));
        assert_eq!(bond.coupon_payment(), 20.0);
    }

    #[test]
    fn test_issue_and_term() {
        let bond = Bond::builder()
            .issue_date(d("2020-02-29"))
            .term_years(10)
            .coupon_rate(0.03)
            .build()
            .unwrap();
        assert_eq!(bond.maturity(), d("2030-02-28"));
        assert_eq!(bond.term_years(), 10.0);
    }

    #[test]
    fn test_lone_issue_date() {
        let bond = Bond::builder()
            .issue_date(d("2001-03-01"))
            .coupon_rate(0.03)
            .build()
            .unwrap();
        assert_eq!(bond.maturity(), d("2031-03-01"));
    }

    #[test]
    fn test_issue_and_maturity() {
        let whole = Bond::builder()
            .issue_date(d("2005-07-01"))
            .maturity(d("2015-07-01"))
            .coupon_rate(0.1)
            .build()
            .unwrap();
        assert_eq!(whole.term_years(), 10.0);

        let broken = Bond::builder()
            .issue_date(d("2005-06-30"))
            .maturity(d("2007-01-02"))
            .coupon_rate(0.055)
            .build()
            .unwrap();
        assert!((broken.term_years() - 551.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn test_all_three_must_agree() {
        let ok = Bond::builder()
            .issue_date(d("2008-01-01"))
            .maturity(d("2016-01-01"))
            .term_years(8)
            .coupon_rate(0.08)
            .build();
        assert!(ok.is_ok());

        let bad = Bond::builder()
            .issue_date(d("2008-01-01"))
            .maturity(d("2016-01-01"))
            .term_years(7)
            .coupon_rate(0.08)
            .build();
        assert!(matches!(bad, Err(BondError::InvalidSpec { .. })));
    }

    #[test]
    fn test_missing_fields() {
        let no_coupon = Bond::builder().maturity(d("2030-01-01")).build();
        assert_eq!(no_coupon, Err(BondError::missing_field("coupon_rate")));

        let term_only = Bond::builder().term_years(10).coupon_rate(0.05).build();
        assert!(matches!(term_only, Err(BondError::MissingField { .. })));

        let nothing = Bond::builder().coupon_rate(0.05).build();
        assert!(matches!(nothing, Err(BondError::MissingField { .. })));
    }

    #[test]
    fn test_validation() {
        let base = || Bond::builder().maturity(d("2030-01-01"));

        assert!(base().coupon_rate(5.75).build().is_err());
        assert!(base().coupon_rate(-0.01).build().is_err());
        assert!(base().coupon_rate(0.05).face(0.0).build().is_err());
        assert!(base().coupon_rate(0.05).face(-100.0).build().is_err());
        assert!(base().coupon_rate(0.05).term_years(101).build().is_err());
        assert!(base().coupon_rate(0.05).term_years(0).build().is_err());
        assert!(base().coupon_rate(0.0).build().is_ok());
        assert!(base().coupon_rate(1.0).term_years(100).build().is_ok());

        let backwards = Bond::builder()
            .issue_date(d("2030-01-01"))
            .maturity(d("2020-01-01"))
            .coupon_rate(0.05)
            .build();
        assert!(matches!(backwards, Err(BondError::InvalidSpec { .. })));
    }

    #[test]
    fn test_display() {
        let bond = Bond::builder()
            .maturity(d("2017-11-15"))
            .coupon_rate(0.0575)
            .face(100.0)
            .build()
            .unwrap();
        assert_eq!(
            bond.to_string(),
            "Bond[100.00 face, 5.750% coupon, due 2017-11-15, Semi-Annual, issued 1987-11-15]"
        );
    }
}
