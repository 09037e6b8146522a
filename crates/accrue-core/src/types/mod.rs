//! Domain types: dates, periods and compounding regimes.

mod date;
mod frequency;
mod period;

pub use date::{days_in_month, is_leap_year, Date};
pub use frequency::{Compounding, Frequency};
pub use period::Period;
