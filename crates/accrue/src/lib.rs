//! # Accrue
//!
//! Time-value-of-money analytics in one dependency.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`core`]: dates, periods, compounding and day-count conventions
//! - [`math`]: bisection solvers and annuity factors
//! - [`flows`]: dated cash points and cash flows (NPV, IRR, MIRR)
//! - [`bonds`]: fixed coupon bonds (price, yield, duration)
//!
//! ## Example
//!
//! ```rust
//! use accrue::prelude::*;
//!
//! let flow: CashFlow = [
//!     CashPoint::on(-1_000.0, "2020-01-01").unwrap(),
//!     CashPoint::on(1_210.0, "2022-01-01").unwrap(),
//! ]
//! .into_iter()
//! .collect();
//!
//! let irr = flow.irr(&IrrConfig::default());
//! assert!((irr - 0.10).abs() < 1e-6);
//!
//! let bond = Bond::builder()
//!     .maturity(Date::parse("2017-11-15").unwrap())
//!     .coupon_rate(0.0575)
//!     .face(100.0)
//!     .build()
//!     .unwrap();
//! let settle = Date::parse("2008-02-15").unwrap();
//! let price = bond.price(0.065, settle, DayCountConvention::Thirty360US).unwrap();
//! assert!((price - 94.6221).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub use accrue_bonds as bonds;
pub use accrue_core as core;
pub use accrue_flows as flows;
pub use accrue_math as math;

/// Everything needed for day-to-day use.
pub mod prelude {
    pub use accrue_bonds::prelude::{Bond, BondBuilder, BondError, BondResult, DurationResult, YieldConfig};
    pub use accrue_core::prelude::*;
    pub use accrue_flows::prelude::{
        CashFlow, CashPoint, FlowError, FlowResult, IrrConfig, DEFAULT_BORROW_RATE, DEFAULT_EARN_RATE,
    };
    pub use accrue_math::prelude::{Evaluation, MathError, MathResult};
}
