//! ODE integration: fixed-step RK4 and adaptive embedded Runge-Kutta pairs.
//!
//! # Fixed-step
//!
//! [`rk4_step`] and [`rk4`] provide classic 4th-order Runge-Kutta integration.
//!
//! # Adaptive embedded pairs
//!
//! All adaptive solvers implement the [`EmbeddedRK`] trait with Butcher tableau
//! constants. [`EmbeddedRK::solve`] forms a high- and a low-order solution from
//! the same stages, measures their difference in a mixed absolute/relative RMS
//! norm, and accepts (`err ≤ 1`) or rejects the step. The next step size is
//! `safety · h · err^(-1/ORDER)`, clamped by growth limits and
//! `[min_step, max_step]`.
//!
//! | Solver                  | Stages | Order | FSAL |
//! |-------------------------|--------|-------|------|
//! | [`DormandPrince45`]     |      7 | 5(4)  | yes  |
//! | [`Fehlberg45`]          |      6 | 5(4)  | no   |
//! | [`BogackiShampine32`]   |      4 | 3(2)  | yes  |
//!
//! The returned [`Trajectory`] holds every accepted point, lands exactly on
//! `tf`, and reports budget exhaustion through `reached_end` and
//! [`Trajectory::diagnostics`] rather than an error.
//!
//! # Example
//!
//! ```
//! use numint::ode::{dopri_solve, StepControl};
//!
//! // Harmonic oscillator: y'' = -y  →  [y, y'] with dy/dt = [y', -y]
//! let tau = 2.0 * std::f64::consts::PI;
//! let settings = StepControl { atol: 1e-10, rtol: 1e-10, ..StepControl::default() };
//! let sol = dopri_solve(|_t, y: &[f64; 2]| [y[1], -y[0]], (0.0, tau), &[1.0, 0.0], &settings).unwrap();
//! let (tf, yf) = sol.last();
//! assert_eq!(tf, tau);
//! assert!((yf[0] - 1.0).abs() < 1e-8);
//! assert!(yf[1].abs() < 1e-8);
//! ```

mod adaptive;
mod bs23;
mod dopri5;
mod rk4;
mod rkf45;

use alloc::vec::Vec;
use core::fmt;

use crate::traits::{cst, FloatScalar, OdeState};


pub use adaptive::{EmbeddedRK, StepControl};
pub use bs23::BogackiShampine32;
pub use dopri5::{dopri_solve, DormandPrince45};
pub use rk4::{rk4, rk4_step};
pub use rkf45::Fehlberg45;

/// Errors from ODE integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OdeError {
    /// Step error or state became non-finite (NaN / Inf).
    StepNotFinite,
    /// `atol` or `rtol` is not strictly positive and finite.
    InvalidTolerance,
    /// `min_step` / `max_step` not positive, or `max_step < min_step`.
    InvalidStepBounds,
    /// `initial_step` is not positive and finite.
    InvalidInitialStep,
    /// `max_steps` is zero.
    InvalidMaxSteps,
    /// `safety`, `min_factor`, or `max_factor` out of range.
    InvalidController,
    /// `t0` or `tf` is NaN or infinite.
    NonFiniteSpan,
    /// The right-hand side returned a state of a different dimension than `y0`.
    DimensionMismatch,
    /// Interpolation requested but no dense output stored.
    NoDenseOutput,
    /// Interpolation point outside solution bounds.
    InterpOutOfBounds,
}

impl fmt::Display for OdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepNotFinite => write!(f, "step error is not finite"),
            Self::InvalidTolerance => write!(f, "atol and rtol must be positive and finite"),
            Self::InvalidStepBounds => write!(f, "step bounds must satisfy 0 < min_step <= max_step"),
            Self::InvalidInitialStep => write!(f, "initial step must be positive and finite"),
            Self::InvalidMaxSteps => write!(f, "max_steps must be at least 1"),
            Self::InvalidController => {
                write!(f, "require 0 < safety, 0 < min_factor <= 1 <= max_factor")
            }
            Self::NonFiniteSpan => write!(f, "time span must be finite"),
            Self::DimensionMismatch => write!(f, "derivative dimension does not match state"),
            Self::NoDenseOutput => write!(f, "no dense output in solution"),
            Self::InterpOutOfBounds => write!(f, "interpolation point out of bounds"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OdeError {}

/// Non-fatal events recorded while stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OdeDiagnostic<T> {
    /// A step with `err > 1` was accepted because it was already at `min_step`.
    MinStepForced {
        /// Start of the step.
        t: T,
        /// Step size taken.
        h: T,
        /// Scaled error norm of the step.
        err: T,
    },
    /// `max_steps` attempts were used before reaching `tf`.
    MaxStepsReached {
        /// Last accepted time.
        t: T,
    },
    /// The step was too small to change `t` in floating point; stepping
    /// stopped there.
    StepUnderflow {
        /// Last accepted time.
        t: T,
    },
}

/// Output of an ODE integration: every accepted `(t, y)` pair plus statistics.
#[derive(Debug, Clone)]
pub struct Trajectory<T, Y> {
    /// Independent variable at each output point; `t[0] = t0`.
    pub t: Vec<T>,
    /// State at each output point; `y[0] = y0`.
    pub y: Vec<Y>,
    /// Derivative at each output point (only with `dense_output`).
    pub dy: Option<Vec<Y>>,
    /// Total right-hand-side evaluations.
    pub evals: usize,
    /// Step attempts, accepted or rejected.
    pub attempts: usize,
    /// Accepted steps, including forced and landing steps.
    pub accepted: usize,
    /// Rejected steps. These never appear in the output.
    pub rejected: usize,
    /// Steps accepted with `err > 1` at `min_step`.
    pub forced: usize,
    /// The final point was reached with a fixed RK4 step.
    pub landing_step: bool,
    /// The last point is exactly `tf`.
    pub reached_end: bool,
    /// Non-fatal events, in the order they occurred.
    pub diagnostics: Vec<OdeDiagnostic<T>>,
}

impl<T: FloatScalar, Y: OdeState<T>> Trajectory<T, Y> {
    pub(crate) fn start(t0: T, y0: Y) -> Self {
        let mut t = Vec::new();
        let mut y = Vec::new();
        t.push(t0);
        y.push(y0);
        Self {
            t,
            y,
            dy: None,
            evals: 0,
            attempts: 0,
            accepted: 0,
            rejected: 0,
            forced: 0,
            landing_step: false,
            reached_end: false,
            diagnostics: Vec::new(),
        }
    }

    /// Number of output points.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always `false`: the initial point is always present.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Final time and state.
    pub fn last(&self) -> (T, &Y) {
        let n = self.t.len() - 1;
        (self.t[n], &self.y[n])
    }

    /// Iterate over `(t, &y)` pairs in integration order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &Y)> + '_ {
        self.t.iter().copied().zip(self.y.iter())
    }

    /// Interpolate the solution at `t_interp` with a cubic Hermite polynomial
    /// between neighbouring output points.
    ///
    /// Requires `dense_output = true` in [`StepControl`].
    pub fn interpolate(&self, t_interp: T) -> Result<Y, OdeError> {
        let dy = self.dy.as_ref().ok_or(OdeError::NoDenseOutput)?;
        let n = self.t.len();
        let first = self.t[0];
        let last = self.t[n - 1];
        let forward = last >= first;

        let (lo, hi) = if forward { (first, last) } else { (last, first) };
        if !(t_interp >= lo && t_interp <= hi) {
            return Err(OdeError::InterpOutOfBounds);
        }
        if n == 1 {
            return Ok(self.y[0].clone());
        }

        // Segment i with t_interp between t[i] and t[i+1]
        let past = if forward {
            self.t.partition_point(|&x| x <= t_interp)
        } else {
            self.t.partition_point(|&x| x >= t_interp)
        };
        let i = past.saturating_sub(1).min(n - 2);

        let h = self.t[i + 1] - self.t[i];
        let s = (t_interp - self.t[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;
        let two = cst::<T>(2.0);
        let three = cst::<T>(3.0);

        // Hermite basis: h00 = 2s³ - 3s² + 1, h10 = s³ - 2s² + s
        //                h01 = -2s³ + 3s², h11 = s³ - s²
        let h00 = two * s3 - three * s2 + T::one();
        let h10 = s3 - two * s2 + s;
        let h01 = three * s2 - two * s3;
        let h11 = s3 - s2;

        let mut out = self.y[i].clone();
        out.scale(h00);
        out.axpy(h10 * h, &dy[i]);
        out.axpy(h01, &self.y[i + 1]);
        out.axpy(h11 * h, &dy[i + 1]);
        Ok(out)
    }
}
