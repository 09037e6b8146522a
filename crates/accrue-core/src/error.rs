//! Error types for the Accrue library.
//!
//! Everything here is a usage error: a precondition the caller violated.
//! Numerically undefined results are reported as `NaN` by the higher
//! layers and never surface as an [`AccrueError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type AccrueResult<T> = Result<T, AccrueError>;

/// The error type for calendar and convention handling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccrueError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A compounding frequency outside the supported set.
    #[error("Invalid frequency: {value} (expected simple, continuous, or one of 1, 2, 3, 4, 6, 12)")]
    InvalidFrequency {
        /// The rejected value, as given.
        value: String,
    },

    /// An unknown day count convention code or name.
    #[error("Invalid day count convention: {value}")]
    InvalidDayCount {
        /// The rejected value, as given.
        value: String,
    },

    /// A date range whose end precedes its start.
    #[error("Invalid period: {first} is after {last}")]
    InvalidPeriod {
        /// Period start.
        first: String,
        /// Period end.
        last: String,
    },
}

impl AccrueError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(value: impl ToString) -> Self {
        Self::InvalidFrequency {
            value: value.to_string(),
        }
    }

    /// Creates an invalid day count error.
    #[must_use]
    pub fn invalid_day_count(value: impl ToString) -> Self {
        Self::InvalidDayCount {
            value: value.to_string(),
        }
    }
}
