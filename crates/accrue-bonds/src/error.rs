//! Error types for bond operations.

use thiserror::Error;

use accrue_core::AccrueError;
use accrue_flows::FlowError;
use accrue_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Yield outside `[0, 1]`.
    #[error("Invalid yield {value}: use a decimal between 0 and 1, not a percentage")]
    InvalidYield {
        /// The rejected yield.
        value: f64,
    },

    /// Invalid price.
    #[error("Invalid price: {reason}")]
    InvalidPrice {
        /// Description of what's invalid.
        reason: String,
    },

    /// Settlement date is on or after maturity.
    #[error("Settlement date {settlement} is not before maturity {maturity}")]
    SettlementAfterMaturity {
        /// Settlement date.
        settlement: String,
        /// Maturity date.
        maturity: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] AccrueError),

    /// Math error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Cash flow error.
    #[error("Cash flow error: {0}")]
    Flow(#[from] FlowError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            reason: reason.into(),
        }
    }
}
