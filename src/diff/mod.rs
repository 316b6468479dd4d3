//! Numerical differentiation: finite differences and Richardson extrapolation.
//!
//! - [`forward_difference`]: `(f(x+h) - f(x)) / h`, `O(h)`
//! - [`central_difference`]: `(f(x+h) - f(x-h)) / 2h`, `O(h²)`
//! - [`second_difference`]: `(f(x+h) - 2f(x) + f(x-h)) / h²`, `O(h²)`
//! - [`richardson_derivative`]: central differences at `h₀, h₀/2, h₀/4, …`
//!   combined with the same column recurrence as Romberg integration.
//!
//! # Example
//!
//! ```
//! use numint::diff::{richardson_derivative, DerivativeSettings};
//!
//! let d = richardson_derivative(|x: f64| x.exp(), 1.0, &DerivativeSettings::default()).unwrap();
//! assert!(d.converged);
//! assert!((d.value - 1.0_f64.exp()).abs() < 1e-10);
//! ```

#[cfg(test)]
mod tests;

use alloc::vec;
use alloc::vec::Vec;

use crate::extrapolate::next_row;
use crate::traits::{cst, FloatScalar};

/// Errors from numerical differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiffError {
    /// Initial step is zero, negative, or not finite.
    InvalidStep,
    /// Tolerance is not strictly positive and finite.
    InvalidTolerance,
    /// `levels` is zero.
    InvalidLevels,
}

impl core::fmt::Display for DiffError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DiffError::InvalidStep => write!(f, "step size must be positive and finite"),
            DiffError::InvalidTolerance => write!(f, "tolerance must be positive and finite"),
            DiffError::InvalidLevels => write!(f, "levels must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DiffError {}

/// Settings for [`richardson_derivative`].
#[derive(Debug, Clone, Copy)]
pub struct DerivativeSettings<T> {
    /// Largest step, halved at each level (default: 0.1).
    pub h0: T,
    /// Maximum number of step halvings plus one (default: 8).
    pub levels: usize,
    /// Early-stop threshold on successive diagonal entries (default: 1e-10).
    pub tol: T,
}

impl Default for DerivativeSettings<f64> {
    fn default() -> Self {
        Self {
            h0: 0.1,
            levels: 8,
            tol: 1e-10,
        }
    }
}

impl Default for DerivativeSettings<f32> {
    fn default() -> Self {
        Self {
            h0: 0.1,
            levels: 5,
            tol: 1e-4,
        }
    }
}

/// Result of [`richardson_derivative`].
#[derive(Debug, Clone, Copy)]
pub struct DerivativeResult<T> {
    /// Approximate derivative.
    pub value: T,
    /// Difference of the last two diagonal entries (`+∞` with one level).
    pub error_estimate: T,
    /// Levels actually built.
    pub levels: usize,
    /// Function evaluations.
    pub evals: usize,
    /// `true` if the tolerance was met before running out of levels.
    pub converged: bool,
}

/// Forward difference `(f(x+h) - f(x)) / h`.
pub fn forward_difference<T: FloatScalar>(mut f: impl FnMut(T) -> T, x: T, h: T) -> T {
    (f(x + h) - f(x)) / h
}

/// Central difference `(f(x+h) - f(x-h)) / 2h`.
///
/// ```
/// use numint::diff::central_difference;
///
/// let d = central_difference(|x: f64| x * x * x, 2.0, 1e-4);
/// assert!((d - 12.0).abs() < 1e-7);
/// ```
pub fn central_difference<T: FloatScalar>(mut f: impl FnMut(T) -> T, x: T, h: T) -> T {
    (f(x + h) - f(x - h)) / (h + h)
}

/// Second-order central difference for `f''(x)`.
pub fn second_difference<T: FloatScalar>(mut f: impl FnMut(T) -> T, x: T, h: T) -> T {
    (f(x + h) - f(x) * cst(2.0) + f(x - h)) / (h * h)
}

/// Derivative by Richardson extrapolation of central differences.
///
/// Row `i` holds the central difference with step `h₀ / 2^i`; column `j`
/// removes the `O(h^{2j})` error term. Stops once two successive diagonal
/// entries differ by less than `tol`, or after `levels` rows.
///
/// # Errors
///
/// [`DiffError::InvalidStep`], [`DiffError::InvalidTolerance`], or
/// [`DiffError::InvalidLevels`] for bad settings.
pub fn richardson_derivative<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    x: T,
    settings: &DerivativeSettings<T>,
) -> Result<DerivativeResult<T>, DiffError> {
    if !(settings.h0 > T::zero()) || !settings.h0.is_finite() {
        return Err(DiffError::InvalidStep);
    }
    if !(settings.tol > T::zero()) || !settings.tol.is_finite() {
        return Err(DiffError::InvalidTolerance);
    }
    if settings.levels == 0 {
        return Err(DiffError::InvalidLevels);
    }

    let half = cst::<T>(0.5);
    let mut h = settings.h0;
    let mut prev: Vec<T> = vec![central_difference(&mut f, x, h)];
    let mut evals = 2usize;
    let mut error = T::infinity();
    let mut converged = false;

    for i in 1..settings.levels {
        h = h * half;
        let row = next_row(&prev, central_difference(&mut f, x, h));
        evals += 2;
        error = (row[i] - prev[i - 1]).abs();
        prev = row;
        if error < settings.tol {
            converged = true;
            break;
        }
    }

    Ok(DerivativeResult {
        value: prev[prev.len() - 1],
        error_estimate: error,
        levels: prev.len(),
        evals,
        converged,
    })
}
