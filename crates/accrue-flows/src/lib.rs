//! # Accrue Flows
//!
//! Dated payments and their time value:
//!
//! - [`CashPoint`]: one amount on one date, valued forward or back under any
//!   [`Compounding`](accrue_core::types::Compounding) regime
//! - [`CashFlow`]: a date-keyed stream of points with NPV, IRR (Newton-Raphson
//!   with a bisection fallback), MIRR and period slicing
//!
//! ## Example
//!
//! ```rust
//! use accrue_flows::prelude::*;
//!
//! let flow: CashFlow = vec![
//!     CashPoint::on(-40_000.0, "2022-01-15").unwrap(),
//!     CashPoint::on(25_000.0, "2023-01-15").unwrap(),
//!     CashPoint::on(25_000.0, "2024-01-15").unwrap(),
//! ]
//! .into();
//!
//! let irr = flow.irr(&IrrConfig::default());
//! assert!(flow.npv(irr, Compounding::ANNUAL).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod cash_flow;
pub mod cash_point;
pub mod error;
pub mod irr;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cash_flow::{CashFlow, DEFAULT_BORROW_RATE, DEFAULT_EARN_RATE};
    pub use crate::cash_point::CashPoint;
    pub use crate::error::{FlowError, FlowResult};
    pub use crate::irr::{IrrConfig, NewtonState};
    pub use accrue_core::types::{Compounding, Date, Frequency, Period};
}

pub use cash_flow::{CashFlow, DEFAULT_BORROW_RATE, DEFAULT_EARN_RATE};
pub use cash_point::CashPoint;
pub use error::{FlowError, FlowResult};
pub use irr::{IrrConfig, NewtonState};
