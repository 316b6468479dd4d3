//! Numerical quadrature: adaptive subdivision, Romberg extrapolation, and
//! composite fixed rules.
//!
//! # Adaptive subdivision
//!
//! [`adaptive_integrate`] compares a coarse and a refined rule on each
//! segment. Segments whose local error exceeds their tolerance budget are
//! bisected, each half receiving half the budget, so the leaf budgets sum
//! exactly to the requested `tol`. Depth is bounded by `max_depth`.
//!
//! | [`Rule`]        | Nodes / segment | New evals / split | Exact for |
//! |-----------------|-----------------|-------------------|-----------|
//! | `Trapezoid`     | 3               | 2                 | linear    |
//! | `Simpson`       | 5               | 4                 | cubic     |
//!
//! # Romberg extrapolation
//!
//! [`romberg_integrate`] builds trapezoid refinements with `1, 2, 4, …`
//! panels and applies repeated Richardson extrapolation. [`romberg_table`]
//! exposes the whole triangular table.
//!
//! # Non-convergence
//!
//! Running out of depth or levels is not an error: the best estimate is
//! returned with `converged = false` and an entry in
//! [`IntegrationResult::diagnostics`].
//!
//! # Example
//!
//! ```
//! use numint::quad::{romberg_integrate, RombergSettings};
//!
//! let r = romberg_integrate(|x: f64| x.exp(), 0.0, 1.0, &RombergSettings::default()).unwrap();
//! assert!(r.converged);
//! assert!((r.value - (1.0_f64.exp() - 1.0)).abs() < 1e-10);
//! ```

mod adaptive;
mod romberg;
mod rules;


pub use adaptive::{adaptive_integrate, AdaptiveSettings};
pub use romberg::{romberg_integrate, romberg_table, RombergSettings, RombergTable};
pub use rules::{simpson, trapezoid, Rule, RulePair};

use alloc::vec::Vec;

use crate::traits::FloatScalar;

/// Errors from quadrature routines. All are precondition violations,
/// reported before the integrand is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadError {
    /// Tolerance is not strictly positive and finite.
    InvalidTolerance,
    /// An interval bound is NaN or infinite.
    NonFiniteBounds,
    /// `max_depth` is larger than the supported 64.
    DepthTooLarge,
    /// `max_levels` is zero or larger than the supported 30.
    InvalidLevels,
    /// Panel count is zero (or odd, for Simpson's rule).
    InvalidPanels,
}

impl core::fmt::Display for QuadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QuadError::InvalidTolerance => write!(f, "tolerance must be positive and finite"),
            QuadError::NonFiniteBounds => write!(f, "integration bounds must be finite"),
            QuadError::DepthTooLarge => write!(f, "max_depth must not exceed 64"),
            QuadError::InvalidLevels => write!(f, "max_levels must be between 1 and 30"),
            QuadError::InvalidPanels => {
                write!(f, "panel count must be positive (and even for Simpson's rule)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QuadError {}

/// Non-fatal events recorded while integrating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadDiagnostic<T> {
    /// A segment reached `max_depth` with its local error still above its
    /// tolerance budget.
    DepthExhausted {
        /// Segment lower bound.
        a: T,
        /// Segment upper bound.
        b: T,
        /// Local error estimate of the segment.
        error: T,
        /// Tolerance budget of the segment.
        tol: T,
    },
    /// The local error estimate was NaN or infinite; the segment was not refined.
    NonFinite {
        /// Segment lower bound.
        a: T,
        /// Segment upper bound.
        b: T,
    },
    /// Romberg extrapolation used every level without meeting `tol`.
    LevelsExhausted {
        /// Rows built.
        levels: usize,
        /// Difference of the last two diagonal entries.
        error: T,
    },
}

/// One accepted segment of an adaptive subdivision.
///
/// Recorded only when [`AdaptiveSettings::record_leaves`] is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf<T> {
    /// Segment lower bound.
    pub a: T,
    /// Segment upper bound.
    pub b: T,
    /// Number of bisections from the original interval.
    pub depth: usize,
    /// Tolerance budget: `tol / 2^depth`.
    pub tol: T,
    /// Refined estimate contributed by the segment.
    pub value: T,
    /// Local error estimate `|I_high - I_low|`.
    pub error: T,
    /// `error <= tol`.
    pub converged: bool,
}

/// Result of a quadrature call.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationResult<T> {
    /// Approximate integral.
    pub value: T,
    /// Estimated absolute error. An estimate, not a bound.
    pub error_estimate: T,
    /// Number of integrand evaluations.
    pub n_function_calls: usize,
    /// Interval splits (adaptive) or refinement rows after the first (Romberg).
    pub n_subdivisions: usize,
    /// `false` if a depth or level budget ran out before the tolerance was met.
    pub converged: bool,
    /// Non-fatal events, in the order they occurred.
    pub diagnostics: Vec<QuadDiagnostic<T>>,
    /// Accepted segments, left to right (adaptive only, on request).
    pub leaves: Option<Vec<Leaf<T>>>,
}

impl<T: FloatScalar> IntegrationResult<T> {
    /// Result for a zero-width interval: nothing to integrate.
    fn zero() -> Self {
        Self {
            value: T::zero(),
            error_estimate: T::zero(),
            n_function_calls: 0,
            n_subdivisions: 0,
            converged: true,
            diagnostics: Vec::new(),
            leaves: None,
        }
    }
}

fn check_bounds<T: FloatScalar>(a: T, b: T) -> Result<(), QuadError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadError::NonFiniteBounds);
    }
    Ok(())
}

fn check_tol<T: FloatScalar>(tol: T) -> Result<(), QuadError> {
    // NaN fails the comparison as well
    if !(tol > T::zero()) || !tol.is_finite() {
        return Err(QuadError::InvalidTolerance);
    }
    Ok(())
}
