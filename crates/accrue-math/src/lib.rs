//! # Accrue Math
//!
//! Numerical building blocks for the Accrue library:
//!
//! - [`Evaluation`]: a formula's result at some rate, which may be real,
//!   undefined, or complex
//! - [`solvers`]: bracketing root finders with iteration ceilings
//! - [`annuity_present_value`]: closed-form level annuity

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]

pub mod annuity;
pub mod error;
pub mod evaluation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annuity::annuity_present_value;
    pub use crate::error::{MathError, MathResult};
    pub use crate::evaluation::Evaluation;
    pub use crate::solvers::{bisection, bisection_rounded, SolverConfig, SolverResult};
}

pub use annuity::annuity_present_value;
pub use error::{MathError, MathResult};
pub use evaluation::Evaluation;
