//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccrueError;

/// Number of periods per year; always a divisor of 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual (1 per year)
    #[default]
    Annual,
    /// Semi-annual (2 per year) - US treasuries and corporates
    SemiAnnual,
    /// Every four months (3 per year)
    Triannual,
    /// Quarterly (4 per year)
    Quarterly,
    /// Every two months (6 per year)
    BiMonthly,
    /// Monthly (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Triannual => 3,
            Frequency::Quarterly => 4,
            Frequency::BiMonthly => 6,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Returns all frequencies, from annual to monthly.
    #[must_use]
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Triannual,
            Frequency::Quarterly,
            Frequency::BiMonthly,
            Frequency::Monthly,
        ]
    }
}

impl TryFrom<u32> for Frequency {
    type Error = AccrueError;

    fn try_from(periods: u32) -> Result<Self, Self::Error> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            3 => Ok(Frequency::Triannual),
            4 => Ok(Frequency::Quarterly),
            6 => Ok(Frequency::BiMonthly),
            12 => Ok(Frequency::Monthly),
            other => Err(AccrueError::invalid_frequency(other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Triannual => "Triannual",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiMonthly => "Bi-Monthly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "annual" | "annually" | "yearly" => Ok(Frequency::Annual),
            "semiannual" | "semiannually" => Ok(Frequency::SemiAnnual),
            "triannual" => Ok(Frequency::Triannual),
            "quarterly" => Ok(Frequency::Quarterly),
            "bimonthly" => Ok(Frequency::BiMonthly),
            "monthly" => Ok(Frequency::Monthly),
            _ => normalized
                .parse::<u32>()
                .map_err(|_| AccrueError::invalid_frequency(s))
                .and_then(Frequency::try_from),
        }
    }
}

/// How interest accrues over time.
///
/// The three regimes are mutually exclusive; a discrete regime always
/// carries a valid [`Frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Compounded a whole number of times per year
    Discrete(Frequency),
    /// Continuous compounding
    Continuous,
}

impl Compounding {
    /// Annual compounding.
    pub const ANNUAL: Compounding = Compounding::Discrete(Frequency::Annual);

    /// Returns the number of compounding periods per year, if discrete.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Discrete(freq) => Some(freq.periods_per_year()),
            Compounding::Simple | Compounding::Continuous => None,
        }
    }

    /// Lowest rate at which the growth factor stays positive.
    ///
    /// Discrete compounding at `n` periods needs `1 + r/n > 0`, simple
    /// interest needs `1 + r > 0` over a year. Continuous compounding is
    /// defined for every rate.
    #[must_use]
    pub fn rate_floor(&self) -> Option<f64> {
        match self {
            Compounding::Discrete(freq) => Some(-f64::from(freq.periods_per_year())),
            Compounding::Simple => Some(-1.0),
            Compounding::Continuous => None,
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }

    /// Returns true if this is simple interest (no compounding).
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self, Compounding::Simple)
    }
}

impl Default for Compounding {
    fn default() -> Self {
        Compounding::ANNUAL
    }
}

impl From<Frequency> for Compounding {
    fn from(freq: Frequency) -> Self {
        Compounding::Discrete(freq)
    }
}

/// `0` selects simple interest, a divisor of 12 selects discrete compounding.
impl TryFrom<u32> for Compounding {
    type Error = AccrueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Ok(Compounding::Simple)
        } else {
            Frequency::try_from(value).map(Compounding::Discrete)
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Simple => write!(f, "Simple"),
            Compounding::Discrete(freq) => write!(f, "{freq}"),
            Compounding::Continuous => write!(f, "Continuous"),
        }
    }
}

impl FromStr for Compounding {
    type Err = AccrueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "0" => Ok(Compounding::Simple),
            "continuous" | "cont" => Ok(Compounding::Continuous),
            _ => s.parse::<Frequency>().map(Compounding::Discrete),
        }
    }
}
