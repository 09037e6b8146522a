//! Bisection root-finding algorithms.

use log::trace;
use rust_decimal::Decimal;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Evaluates `f` at `x`, rejecting `NaN`.
fn real_at<F: Fn(f64) -> f64>(f: &F, x: f64) -> MathResult<f64> {
    let y = f(x);
    if y.is_nan() {
        Err(MathError::NotReal { x })
    } else {
        Ok(y)
    }
}

/// Orders the bracket and checks that it straddles a sign change.
fn checked_bracket<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> MathResult<(f64, f64, f64, f64)> {
    let lo = a.min(b);
    let hi = a.max(b);
    let f_lo = real_at(f, lo)?;
    let f_hi = real_at(f, hi)?;

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }
    Ok((lo, hi, f_lo, f_hi))
}

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half whose ends still have
/// opposite signs. Stops as soon as `|f(mid)|` is within `config.tolerance`
/// or the bracket is narrower than `config.width_tolerance`.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Errors
///
/// - `MathError::InvalidBracket` if both endpoints have the same sign
/// - `MathError::NotReal` if `f` returns `NaN` anywhere it is evaluated
/// - `MathError::ConvergenceFailed` after `config.max_iterations` halvings
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi, mut f_lo, f_hi) = checked_bracket(&f, a, b)?;

    // Handle case where endpoint is the root
    if f_lo.abs() <= config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() <= config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 1..=config.max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = real_at(&f, mid)?;
        trace!("bisection {iteration}: [{lo}, {hi}] f({mid}) = {f_mid}");

        let narrow = config.width_tolerance.is_some_and(|width| hi - lo <= width);
        if f_mid.abs() <= config.tolerance || narrow {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = (lo + hi) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

/// Bisection that converges when the bracket ends agree to `decimal_places`.
///
/// Both ends are rounded as decimals rather than compared against a float
/// tolerance, so the answer is stable to exactly the requested precision.
/// Returns the last midpoint evaluated.
///
/// # Errors
///
/// - `MathError::InvalidBracket` if both endpoints have the same sign
/// - `MathError::NotReal` if `f` returns `NaN` anywhere it is evaluated
/// - `MathError::ConvergenceFailed` after `max_iterations` halvings
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::bisection_rounded;
///
/// let f = |x: f64| 0.5 - x;
/// let result = bisection_rounded(f, 0.0, 1.0, 7, 50).unwrap();
/// assert!((result.root - 0.5).abs() < 1e-7);
/// ```
pub fn bisection_rounded<F>(
    f: F,
    a: f64,
    b: f64,
    decimal_places: u32,
    max_iterations: u32,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi, mut f_lo, f_hi) = checked_bracket(&f, a, b)?;

    if f_lo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut residual = f_lo;
    for iteration in 1..=max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = real_at(&f, mid)?;
        residual = f_mid;
        trace!("bisection {iteration}: [{lo}, {hi}] f({mid}) = {f_mid}");

        if f_mid * f_lo > 0.0 {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }

        if rounded(lo, decimal_places)? == rounded(hi, decimal_places)? {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }
    }

    Err(MathError::convergence_failed(max_iterations, residual.abs()))
}

fn rounded(x: f64, decimal_places: u32) -> MathResult<Decimal> {
    Decimal::try_from(x)
        .map(|d| d.round_dp(decimal_places))
        .map_err(|_| MathError::NotReal { x })
}
