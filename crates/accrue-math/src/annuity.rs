//! Closed-form annuity values.

/// Present value of `periods` level payments of `payment`, each paid at the
/// end of a period, discounted at `rate` per period.
///
/// $$PV = P \cdot \frac{1 - (1 + r)^{-n}}{r}$$
///
/// A zero rate reduces to `periods * payment`. `rate` must exceed -1.
///
/// # Example
///
/// ```rust
/// use accrue_math::annuity_present_value;
///
/// let pv = annuity_present_value(28, 1.0, 0.05);
/// assert!((pv - 14.898_127_26).abs() < 1e-8);
/// ```
#[must_use]
pub fn annuity_present_value(periods: u32, payment: f64, rate: f64) -> f64 {
    let n = f64::from(periods);
    if rate == 0.0 {
        return n * payment;
    }
    payment * (1.0 - (1.0 + rate).powf(-n)) / rate
}
