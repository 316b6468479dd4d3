use alloc::vec;
use alloc::vec::Vec;

use crate::extrapolate::next_row;
use crate::traits::{cst, FloatScalar};

use super::{check_bounds, check_tol, IntegrationResult, QuadDiagnostic, QuadError};

/// Largest supported `max_levels` (the last row has `2^29` panels).
const MAX_LEVELS: usize = 30;

/// Settings for [`romberg_integrate`] and [`romberg_table`].
#[derive(Debug, Clone, Copy)]
pub struct RombergSettings<T> {
    /// Maximum number of table rows (default: 10).
    pub max_levels: usize,
    /// Early-stop threshold on successive diagonal entries (default: `Some(1e-10)`).
    /// `None` always builds every row.
    pub tol: Option<T>,
}

impl Default for RombergSettings<f64> {
    fn default() -> Self {
        Self {
            max_levels: 10,
            tol: Some(1e-10),
        }
    }
}

impl Default for RombergSettings<f32> {
    fn default() -> Self {
        Self {
            max_levels: 10,
            tol: Some(1e-5),
        }
    }
}

/// Triangular Romberg table.
///
/// Row `i` has `i + 1` entries. `R[i][0]` is the trapezoid rule with `2^i`
/// panels and `R[i][j]` has the `O(h^{2j})` error term eliminated.
#[derive(Debug, Clone, PartialEq)]
pub struct RombergTable<T> {
    rows: Vec<Vec<T>>,
    evals: usize,
    converged: bool,
}

impl<T: FloatScalar> RombergTable<T> {
    /// Number of rows built.
    pub fn levels(&self) -> usize {
        self.rows.len()
    }

    /// All rows, first (one panel) to last.
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Entry `R[i][j]`, or `None` outside the triangle.
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Diagonal entries `R[i][i]`, increasing order of accuracy.
    pub fn diagonal(&self) -> impl Iterator<Item = T> + '_ {
        self.rows.iter().enumerate().map(|(i, row)| row[i])
    }

    /// Last diagonal entry, the best available estimate.
    pub fn best(&self) -> T {
        let n = self.rows.len() - 1;
        self.rows[n][n]
    }

    /// `|R[n][n] - R[n-1][n-1]|`, or `+∞` with a single row.
    pub fn error_estimate(&self) -> T {
        let n = self.rows.len();
        if n < 2 {
            return T::infinity();
        }
        (self.rows[n - 1][n - 1] - self.rows[n - 2][n - 2]).abs()
    }

    /// Integrand evaluations used to build the table.
    pub fn evals(&self) -> usize {
        self.evals
    }

    /// `true` if the early-stop threshold was met, or no threshold was set.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

fn validate<T: FloatScalar>(a: T, b: T, settings: &RombergSettings<T>) -> Result<(), QuadError> {
    check_bounds(a, b)?;
    if settings.max_levels == 0 || settings.max_levels > MAX_LEVELS {
        return Err(QuadError::InvalidLevels);
    }
    if let Some(tol) = settings.tol {
        check_tol(tol)?;
    }
    Ok(())
}

/// Build the Romberg table for `∫ₐᵇ f(x) dx`.
///
/// Each new row halves the panel width and evaluates only the newly
/// introduced midpoints, reusing the previous trapezoid sum. With
/// `tol = Some(t)` construction stops as soon as two successive diagonal
/// entries differ by less than `t`.
///
/// The table depends only on the inputs: identical calls give
/// bit-identical rows.
///
/// # Errors
///
/// - [`QuadError::InvalidLevels`] if `max_levels` is 0 or above 30.
/// - [`QuadError::InvalidTolerance`] if `tol` is `Some` non-positive value.
/// - [`QuadError::NonFiniteBounds`] if a bound is not finite.
///
/// # Example
///
/// ```
/// use numint::quad::{romberg_table, RombergSettings};
///
/// let settings = RombergSettings { max_levels: 4, tol: None };
/// let t = romberg_table(|x: f64| x * x, 0.0, 1.0, &settings).unwrap();
/// assert_eq!(t.levels(), 4);
/// // First extrapolated column is Simpson's rule, exact for x²
/// assert!((t.get(1, 1).unwrap() - 1.0 / 3.0).abs() < 1e-15);
/// ```
pub fn romberg_table<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RombergSettings<T>,
) -> Result<RombergTable<T>, QuadError> {
    validate(a, b, settings)?;

    if a == b {
        return Ok(RombergTable {
            rows: vec![vec![T::zero()]],
            evals: 0,
            converged: true,
        });
    }

    let half = cst::<T>(0.5);
    let h = b - a;
    let mut rows: Vec<Vec<T>> = Vec::with_capacity(settings.max_levels);
    rows.push(vec![h * (f(a) + f(b)) * half]);
    let mut evals = 2usize;
    let mut converged = settings.tol.is_none();

    for i in 1..settings.max_levels {
        let panels = 1usize << i;
        let hi = h / cst(panels as f64);

        // Only odd-indexed nodes are new at this level
        let mut sum = T::zero();
        for k in 0..(panels / 2) {
            sum = sum + f(a + hi * cst((2 * k + 1) as f64));
        }
        evals += panels / 2;

        let prev = &rows[i - 1];
        let row = next_row(prev, prev[0] * half + hi * sum);

        let stop = match settings.tol {
            Some(tol) => (row[i] - prev[i - 1]).abs() < tol,
            None => false,
        };
        rows.push(row);
        if stop {
            converged = true;
            break;
        }
    }

    Ok(RombergTable {
        rows,
        evals,
        converged,
    })
}

/// Romberg integration of `∫ₐᵇ f(x) dx`.
///
/// Returns the last diagonal entry of [`romberg_table`]. The error estimate
/// is the difference of the last two diagonal entries. Exhausting
/// `max_levels` without meeting `tol` is reported with `converged = false`
/// and a [`QuadDiagnostic::LevelsExhausted`] entry, never as an error.
///
/// Convergence is fast for integrands with many continuous derivatives;
/// on non-smooth integrands the diagonal can stall.
///
/// # Errors
///
/// Same as [`romberg_table`].
///
/// # Example
///
/// ```
/// use numint::quad::{romberg_integrate, RombergSettings};
///
/// let r = romberg_integrate(|x: f64| x.sin(), 0.0, core::f64::consts::PI,
///     &RombergSettings::default()).unwrap();
/// assert!(r.converged);
/// assert!((r.value - 2.0).abs() < 1e-10);
/// ```
pub fn romberg_integrate<T: FloatScalar>(
    f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RombergSettings<T>,
) -> Result<IntegrationResult<T>, QuadError> {
    validate(a, b, settings)?;
    if a == b {
        return Ok(IntegrationResult::zero());
    }

    let table = romberg_table(f, a, b, settings)?;
    let error = table.error_estimate();
    let mut diagnostics = Vec::new();
    if !table.converged() {
        diagnostics.push(QuadDiagnostic::LevelsExhausted {
            levels: table.levels(),
            error,
        });
    }

    Ok(IntegrationResult {
        value: table.best(),
        error_estimate: error,
        n_function_calls: table.evals(),
        n_subdivisions: table.levels() - 1,
        converged: table.converged(),
        diagnostics,
        leaves: None,
    })
}
