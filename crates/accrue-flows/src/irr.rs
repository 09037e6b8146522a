//! Internal rate of return.
//!
//! [`CashFlow::irr`] runs Newton-Raphson from a guess and hands off to
//! bisection over the bracket [`CashFlow::birr`] would search whenever Newton
//! cannot make progress: a flat derivative, a persistent complex value, or
//! the iteration ceiling. Newton stops only when a short step lands on an NPV
//! within tolerance, and the hand-off bisection ignores bracket width, so
//! every rate `irr` reports is a root to that tolerance. Neither method ever
//! panics or loops unbounded; a rate that cannot be found is `NaN`.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use accrue_core::types::{Compounding, Date};
use accrue_math::solvers::{bisection, SolverConfig};
use accrue_math::{Evaluation, MathError};

use crate::cash_flow::CashFlow;
use crate::error::FlowResult;

/// Guess used when the ratio heuristic is not a finite number.
const FALLBACK_GUESS: f64 = 0.1;

/// Half-width of the initial bracket around the guess.
const BRACKET_HALF_WIDTH: f64 = 0.5;

/// How far the low end moves down per bracket-search step.
const BRACKET_STEP_DOWN: f64 = 0.1;

/// How far the high end moves up per bracket-search step.
const BRACKET_STEP_UP: f64 = 0.2;

/// Solver settings for [`CashFlow::irr`] and [`CashFlow::birr`].
///
/// # Example
///
/// ```rust
/// use accrue_core::types::Compounding;
/// use accrue_flows::IrrConfig;
///
/// let config = IrrConfig::default()
///     .with_tolerance(1e-8)
///     .with_compounding(Compounding::Continuous);
/// assert_eq!(config.max_newton_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrConfig {
    /// Convergence tolerance on both the rate step and the NPV.
    pub tolerance: f64,
    /// Starting rate; the ratio heuristic when `None`.
    pub guess: Option<f64>,
    /// Compounding used to value the flow.
    pub compounding: Compounding,
    /// Newton steps before handing off to bisection.
    pub max_newton_iterations: u32,
    /// Bisection halvings before giving up.
    pub max_bisection_iterations: u32,
    /// Widening steps when searching for a sign change.
    pub max_bracket_steps: u32,
    /// A Newton step beyond this magnitude counts as divergence.
    pub divergence_limit: f64,
    /// Restart rate after divergence from a large guess.
    pub recovery_guess: f64,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            guess: None,
            compounding: Compounding::ANNUAL,
            max_newton_iterations: 100,
            max_bisection_iterations: 150,
            max_bracket_steps: 60,
            divergence_limit: 10_000.0,
            recovery_guess: 0.5,
        }
    }
}

impl IrrConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the starting guess.
    #[must_use]
    pub fn with_guess(mut self, guess: f64) -> Self {
        self.guess = Some(guess);
        self
    }

    /// Sets the compounding.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the Newton iteration ceiling.
    #[must_use]
    pub fn with_max_newton_iterations(mut self, iterations: u32) -> Self {
        self.max_newton_iterations = iterations;
        self
    }

    /// Sets the bisection iteration ceiling.
    #[must_use]
    pub fn with_max_bisection_iterations(mut self, iterations: u32) -> Self {
        self.max_bisection_iterations = iterations;
        self
    }
}

/// Mutable state of one Newton-Raphson run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonState {
    /// Rate being tried.
    pub guess: f64,
    /// Whether the single restart has been spent.
    pub recovered: bool,
    /// Steps taken so far.
    pub iterations: u32,
}

impl NewtonState {
    /// Fresh state at `guess`.
    #[must_use]
    pub fn new(guess: f64) -> Self {
        Self {
            guess,
            recovered: false,
            iterations: 0,
        }
    }

    /// Restarts at `guess` unless a restart was already used.
    ///
    /// Returns whether the restart happened.
    pub fn try_recover(&mut self, guess: f64) -> bool {
        if self.recovered {
            return false;
        }
        self.guess = guess;
        self.recovered = true;
        true
    }
}

impl CashFlow {
    /// Ratio heuristic for a starting rate:
    /// `(inflows / |outflows|)^(1/years) - 1`.
    #[must_use]
    pub fn default_guess(&self) -> f64 {
        let guess = (self.positive_sum() / self.negative_sum().abs()).powf(1.0 / self.years()) - 1.0;
        if guess.is_finite() {
            guess
        } else {
            FALLBACK_GUESS
        }
    }

    /// Internal rate of return: the rate at which the flow's value on its
    /// first date is zero.
    ///
    /// Zero for an empty flow; `NaN` when the flow lacks either inflows or
    /// outflows, or when no root can be found. Otherwise the flow's NPV at
    /// the returned rate is within `config.tolerance`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use accrue_flows::{CashFlow, CashPoint, IrrConfig};
    ///
    /// let flow: CashFlow = vec![
    ///     CashPoint::on(-1_000.0, "2022-01-01").unwrap(),
    ///     CashPoint::on(1_210.0, "2024-01-01").unwrap(),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let irr = flow.irr(&IrrConfig::default());
    /// assert!((irr - 0.10).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn irr(&self, config: &IrrConfig) -> f64 {
        let Some(first) = self.first_date() else {
            return 0.0;
        };
        if !self.mixed_signs() {
            return f64::NAN;
        }

        let initial = match config.guess {
            Some(guess) if guess.is_finite() => guess,
            _ => self.default_guess(),
        };
        let compounding = config.compounding;
        let mut state = NewtonState::new(initial);

        loop {
            state.iterations += 1;
            if state.iterations > config.max_newton_iterations {
                debug!(
                    "irr: no convergence after {} Newton steps, bisecting",
                    config.max_newton_iterations
                );
                return self.bisection_fallback(config);
            }

            let npv = match self.evaluate_on(first, state.guess, compounding) {
                Evaluation::Real(npv) if npv.is_finite() => npv,
                Evaluation::Complex if state.try_recover(-state.guess) => {
                    debug!("irr: complex NPV, retrying from {}", state.guess);
                    continue;
                }
                other => {
                    debug!("irr: NPV {other:?} at {}, bisecting", state.guess);
                    return self.bisection_fallback(config);
                }
            };
            if npv.abs() <= config.tolerance {
                return state.guess;
            }

            let slope = match self.derivative_on(first, state.guess, compounding) {
                Evaluation::Real(slope) => slope,
                Evaluation::Complex if state.try_recover(-state.guess) => {
                    debug!("irr: complex derivative, retrying from {}", state.guess);
                    continue;
                }
                other => {
                    debug!("irr: derivative {other:?} at {}, bisecting", state.guess);
                    return self.bisection_fallback(config);
                }
            };
            if slope.abs() < config.tolerance {
                debug!("irr: flat derivative {slope} at {}, bisecting", state.guess);
                return self.bisection_fallback(config);
            }

            let next = state.guess - npv / slope;
            debug!(
                "irr {}: guess {:.8} npv {:.12} npv' {:.12}",
                state.iterations, state.guess, npv, slope
            );

            if next.abs() > config.divergence_limit
                && initial.abs() > 1.0
                && state.try_recover(config.recovery_guess)
            {
                debug!("irr: diverged to {next}, restarting at {}", state.guess);
                continue;
            }
            // A short step only counts once the NPV agrees
            if (next - state.guess).abs() <= config.tolerance {
                match self.evaluate_on(first, next, compounding).real() {
                    Some(npv) if npv.abs() <= config.tolerance => return next,
                    _ => trace!("irr: short step to {next} but NPV not within tolerance"),
                }
            }
            state.guess = next;
        }
    }

    /// Bisects a searched bracket until the NPV itself is within tolerance,
    /// however narrow the bracket gets.
    fn bisection_fallback(&self, config: &IrrConfig) -> f64 {
        // Only a caller-supplied bracket can fail
        self.bisect(config, None, None).unwrap_or(f64::NAN)
    }

    /// Internal rate of return by bisection.
    ///
    /// With a `bracket`, bisects between its two rates. Without one, searches
    /// outward from [`CashFlow::default_guess`] for two rates whose NPVs
    /// differ in sign, never stepping below the compounding's rate floor.
    /// `NaN` when no sign change turns up or bisection runs out of steps.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Math(MathError::InvalidBracket)` when the NPVs at
    /// the ends of a supplied bracket are not real, or are both strictly
    /// positive or both strictly negative. An end whose NPV is exactly zero
    /// is accepted and returned as the root.
    pub fn birr(&self, config: &IrrConfig, bracket: Option<(f64, f64)>) -> FlowResult<f64> {
        self.bisect(config, bracket, Some(config.tolerance))
    }

    fn bisect(
        &self,
        config: &IrrConfig,
        bracket: Option<(f64, f64)>,
        width_tolerance: Option<f64>,
    ) -> FlowResult<f64> {
        let Some(first) = self.first_date() else {
            return Ok(0.0);
        };
        if !self.mixed_signs() {
            return Ok(f64::NAN);
        }
        let npv = |rate: f64| self.real_npv(first, rate, config.compounding);

        let (lo, hi) = match bracket {
            Some((a, b)) => {
                let (fa, fb) = (npv(a), npv(b));
                if !(fa.is_finite() && fb.is_finite() && fa * fb <= 0.0) {
                    return Err(MathError::InvalidBracket { a, b, fa, fb }.into());
                }
                (a, b)
            }
            None => match self.search_bracket(first, config) {
                Some(found) => found,
                None => {
                    warn!(
                        "birr: no sign change within {} bracket steps",
                        config.max_bracket_steps
                    );
                    return Ok(f64::NAN);
                }
            },
        };

        let solver = SolverConfig::new(config.tolerance, config.max_bisection_iterations)
            .with_width_tolerance(width_tolerance);
        match bisection(npv, lo, hi, &solver) {
            Ok(result) => Ok(result.root),
            Err(err) => {
                warn!("birr: bisection on [{lo}, {hi}] failed: {err}");
                Ok(f64::NAN)
            }
        }
    }

    /// NPV on `first` as a plain float, `NaN` unless real and finite.
    fn real_npv(&self, first: Date, rate: f64, compounding: Compounding) -> f64 {
        self.evaluate_on(first, rate, compounding)
            .real()
            .filter(|v| v.is_finite())
            .unwrap_or(f64::NAN)
    }

    /// Lowest rate the bracket search may reach. Simple discounting of a
    /// point `t` years out has a pole at `-1/t`, so the floor moves up to
    /// stay clear of the latest point.
    fn bracket_floor(&self, compounding: Compounding) -> Option<f64> {
        match compounding {
            Compounding::Simple => Some(-1.0 / self.years().max(1.0)),
            other => other.rate_floor(),
        }
    }

    /// Widens `guess +/- 0.5` until the NPVs at its ends differ in sign.
    fn search_bracket(&self, first: Date, config: &IrrConfig) -> Option<(f64, f64)> {
        let guess = self.default_guess();
        let floor = self.bracket_floor(config.compounding);

        let mut lo = guess - BRACKET_HALF_WIDTH;
        let mut hi = guess + BRACKET_HALF_WIDTH;
        if let Some(floor) = floor {
            if lo <= floor {
                lo = if guess > floor {
                    floor + (guess - floor) / 2.0
                } else {
                    floor + BRACKET_HALF_WIDTH
                };
            }
        }

        for step in 0..config.max_bracket_steps {
            let f_lo = self.real_npv(first, lo, config.compounding);
            let f_hi = self.real_npv(first, hi, config.compounding);
            trace!("bracket {step}: f({lo}) = {f_lo}, f({hi}) = {f_hi}");
            if f_lo.is_finite() && f_hi.is_finite() && (f_lo < 0.0) != (f_hi < 0.0) {
                return Some((lo, hi));
            }

            let lower = lo - BRACKET_STEP_DOWN;
            lo = match floor {
                Some(floor) if lower <= floor => floor + (lo - floor) / 2.0,
                _ => lower,
            };
            hi += BRACKET_STEP_UP;
        }
        None
    }
}
