//! Error types for cash flow operations.

use thiserror::Error;

use accrue_core::AccrueError;
use accrue_math::MathError;

/// A specialized Result type for cash flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur during cash flow operations.
///
/// These are usage errors only. A rate that cannot be found is reported
/// as `NaN`, not as an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// A cash amount that is NaN or infinite.
    #[error("Cash amount on {date} must be finite, got {amount}")]
    NonFiniteAmount {
        /// The rejected amount.
        amount: f64,
        /// Date of the rejected amount.
        date: String,
    },

    /// Core error (dates, frequencies, periods).
    #[error("Core error: {0}")]
    Core(#[from] AccrueError),

    /// Math error (invalid bisection bracket).
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}
