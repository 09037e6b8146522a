//! Root-finding algorithms.
//!
//! Both solvers here are bracketing methods: the caller supplies two points
//! whose function values have opposite signs and the bracket is halved until
//! it pins down the root.
//!
//! - [`bisection`]: stops when `|f(mid)|` falls within the configured
//!   tolerance, or the bracket width within its width tolerance
//! - [`bisection_rounded`]: stops when both bracket ends agree after rounding
//!   to a fixed number of decimal places, which is immune to the last few
//!   bits of floating noise in an expensive pricing function
//!
//! # Example
//!
//! ```rust
//! use accrue_math::solvers::{bisection, SolverConfig};
//!
//! // Rate at which 100 grows to 121 in two years
//! let f = |r: f64| 100.0 * (1.0 + r).powi(2) - 121.0;
//! let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-9);
//! ```

mod bisection;

pub use bisection::{bisection, bisection_rounded};

use serde::{Deserialize, Serialize};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Bracket width at which bisection stops. `None` stops on the residual
    /// alone.
    pub width_tolerance: Option<f64>,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            width_tolerance: Some(DEFAULT_TOLERANCE),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with the bracket width bound to
    /// the same tolerance.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            width_tolerance: Some(tolerance),
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the bracket width tolerance.
    #[must_use]
    pub fn with_width_tolerance(mut self, width_tolerance: Option<f64>) -> Self {
        self.width_tolerance = width_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SolverConfig::default()
            .with_tolerance(1e-5)
            .with_max_iterations(150);
        assert_eq!(config, SolverConfig::new(1e-5, 150));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: SolverConfig = serde_json::from_str(r#"{ "max_iterations": 60 }"#).unwrap();
        assert_eq!(config.max_iterations, 60);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.width_tolerance, Some(DEFAULT_TOLERANCE));

        let residual_only: SolverConfig =
            serde_json::from_str(r#"{ "width_tolerance": null }"#).unwrap();
        assert_eq!(residual_only.width_tolerance, None);
    }
}
