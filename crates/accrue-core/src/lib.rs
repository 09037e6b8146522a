//! # Accrue Core
//!
//! Calendar arithmetic and market conventions for the Accrue
//! time-value-of-money library.
//!
//! - **Types**: [`Date`](types::Date) with 30-day-month distances, inclusive
//!   [`Period`](types::Period)s, and the [`Compounding`](types::Compounding) regimes
//! - **Day Count Conventions**: the five accrual conventions used by bond
//!   pricing, selectable by numeric code
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//!
//! let maturity = Date::parse("2017-11-15").unwrap();
//! let settle = Date::parse("2008-02-15").unwrap();
//! assert_eq!(maturity.month_diff(&settle), 117.0);
//!
//! let compounding = Compounding::try_from(2u32).unwrap();
//! assert_eq!(compounding, Compounding::Discrete(Frequency::SemiAnnual));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{AccrualRules, DayCount, DayCountConvention};
    pub use crate::error::{AccrueError, AccrueResult};
    pub use crate::types::{Compounding, Date, Frequency, Period};
}

// Re-export commonly used types at crate root
pub use error::{AccrueError, AccrueResult};
pub use types::{Compounding, Date, Frequency, Period};
