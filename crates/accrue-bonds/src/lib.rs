//! # Accrue Bonds
//!
//! Fixed coupon bullet bonds:
//!
//! - **Definition**: [`Bond`] built from any two of issue date, maturity
//!   and term
//! - **Schedule**: coupon dates anchored on maturity
//! - **Accrual**: accrued interest under the five supported day counts
//! - **Pricing**: clean price from yield, and yield from price
//! - **Risk**: Macaulay and modified duration
//!
//! ## Example
//!
//! ```rust
//! use accrue_bonds::prelude::*;
//!
//! let bond = Bond::builder()
//!     .maturity(Date::parse("2016-11-15").unwrap())
//!     .coupon_rate(0.0575)
//!     .face(100.0)
//!     .build()
//!     .unwrap();
//!
//! let settle = Date::parse("2008-02-15").unwrap();
//! let yld = bond
//!     .yield_to_maturity(95.92, settle, DayCountConvention::Thirty360US)
//!     .unwrap();
//! assert!((yld - 0.0636).abs() < 1e-4);
//! ```

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
#![allow(clippy::cast_precision_loss)]

pub mod accrual;
pub mod bond;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{Bond, BondBuilder};
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::YieldConfig;
    pub use crate::risk::DurationResult;
    pub use accrue_core::daycounts::DayCountConvention;
    pub use accrue_core::types::{Date, Frequency};
}

pub use bond::{Bond, BondBuilder, DEFAULT_FACE, DEFAULT_TERM_YEARS};
pub use error::{BondError, BondResult};
pub use pricing::YieldConfig;
pub use risk::DurationResult;
