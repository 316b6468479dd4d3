use alloc::vec::Vec;

use crate::traits::{cst, FloatScalar};

use super::rules::MAX_NODES;
use super::{check_bounds, check_tol, IntegrationResult, Leaf, QuadDiagnostic, QuadError, Rule};

/// Largest supported `max_depth`.
const MAX_DEPTH: usize = 64;

/// Settings for [`adaptive_integrate`].
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveSettings<T> {
    /// Absolute error tolerance for the whole interval (default: 1e-8).
    pub tol: T,
    /// Maximum number of bisections along any path (default: 20).
    pub max_depth: usize,
    /// Base rule pair (default: [`Rule::Simpson`]).
    pub rule: Rule,
    /// Record every accepted segment in [`IntegrationResult::leaves`]
    /// (default: false).
    pub record_leaves: bool,
}

impl Default for AdaptiveSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_depth: 20,
            rule: Rule::Simpson,
            record_leaves: false,
        }
    }
}

impl Default for AdaptiveSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-4,
            max_depth: 20,
            rule: Rule::Simpson,
            record_leaves: false,
        }
    }
}

/// Pending segment with its samples, depth, and tolerance budget.
struct Segment<T> {
    a: T,
    b: T,
    fs: [T; MAX_NODES],
    depth: usize,
    tol: T,
}

/// Sample position `i` of `nodes` equally spaced points on `[a, b]`.
#[inline]
fn node<T: FloatScalar>(a: T, b: T, i: usize, nodes: usize) -> T {
    if i + 1 == nodes {
        return b;
    }
    let frac = cst::<T>(i as f64 / (nodes - 1) as f64);
    a + (b - a) * frac
}

/// Adaptive quadrature by recursive bisection with local error control.
///
/// On each segment the coarse and refined estimates of the chosen
/// [`Rule`] are compared. The segment is accepted when
/// `|I_high - I_low| <= tol_segment` or its depth equals `max_depth`;
/// otherwise it is split at the midpoint and each half inherits half the
/// budget. The accepted `I_high` values and local errors are summed.
///
/// Subdivision runs on an explicit stack with the depth stored per segment,
/// so deep budgets do not consume call stack. Leaves are visited left to
/// right, making the result independent of anything but the inputs.
///
/// A reversed interval (`a > b`) yields the negated integral; `a == b`
/// yields zero without evaluating `f`. NaN or ∞ from the integrand
/// propagates into `value`; such segments are not refined further.
///
/// # Errors
///
/// - [`QuadError::InvalidTolerance`] if `tol` is not positive and finite.
/// - [`QuadError::NonFiniteBounds`] if `a` or `b` is not finite.
/// - [`QuadError::DepthTooLarge`] if `max_depth > 64`.
///
/// # Example
///
/// ```
/// use numint::quad::{adaptive_integrate, AdaptiveSettings, Rule};
///
/// let settings = AdaptiveSettings { rule: Rule::Trapezoid, tol: 1e-6, ..AdaptiveSettings::default() };
/// let r = adaptive_integrate(|x: f64| x * x, 0.0, 3.0, &settings).unwrap();
/// assert!(r.converged);
/// assert!((r.value - 9.0).abs() < 1e-6);
/// ```
pub fn adaptive_integrate<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &AdaptiveSettings<T>,
) -> Result<IntegrationResult<T>, QuadError> {
    check_tol(settings.tol)?;
    check_bounds(a, b)?;
    if settings.max_depth > MAX_DEPTH {
        return Err(QuadError::DepthTooLarge);
    }

    if a == b {
        let mut result = IntegrationResult::zero();
        if settings.record_leaves {
            result.leaves = Some(Vec::new());
        }
        return Ok(result);
    }

    let pair = settings.rule.pair::<T>();
    let nodes = pair.nodes;
    let m = nodes / 2;
    let half = cst::<T>(0.5);

    let mut evals = 0usize;
    let mut splits = 0usize;
    let mut value = T::zero();
    let mut error = T::zero();
    let mut converged = true;
    let mut diagnostics = Vec::new();
    let mut leaves = if settings.record_leaves { Some(Vec::new()) } else { None };

    let mut root = Segment {
        a,
        b,
        fs: [T::zero(); MAX_NODES],
        depth: 0,
        tol: settings.tol,
    };
    for i in 0..nodes {
        root.fs[i] = f(node(a, b, i, nodes));
        evals += 1;
    }

    // Depth-first, left child on top: at most `max_depth + 1` live segments.
    let mut stack = Vec::with_capacity(settings.max_depth + 1);
    stack.push(root);

    while let Some(seg) = stack.pop() {
        let h = seg.b - seg.a;
        let fs = &seg.fs[..nodes];
        let low = (pair.coarse)(h, fs);
        let high = (pair.refined)(h, fs);
        let err = (high - low).abs();

        let finite = err.is_finite();
        if !finite || err <= seg.tol || seg.depth >= settings.max_depth {
            let leaf_converged = finite && err <= seg.tol;
            if !finite {
                diagnostics.push(QuadDiagnostic::NonFinite { a: seg.a, b: seg.b });
            } else if !leaf_converged {
                diagnostics.push(QuadDiagnostic::DepthExhausted {
                    a: seg.a,
                    b: seg.b,
                    error: err,
                    tol: seg.tol,
                });
            }
            converged &= leaf_converged;
            value = value + high;
            error = error + err;
            if let Some(ref mut ls) = leaves {
                ls.push(Leaf {
                    a: seg.a,
                    b: seg.b,
                    depth: seg.depth,
                    tol: seg.tol,
                    value: high,
                    error: err,
                    converged: leaf_converged,
                });
            }
            continue;
        }

        // Split: children reuse the parent's samples at their even nodes
        splits += 1;
        let mid = seg.a + h * half;
        let mut left = Segment {
            a: seg.a,
            b: mid,
            fs: [T::zero(); MAX_NODES],
            depth: seg.depth + 1,
            tol: seg.tol * half,
        };
        let mut right = Segment {
            a: mid,
            b: seg.b,
            fs: [T::zero(); MAX_NODES],
            depth: seg.depth + 1,
            tol: seg.tol * half,
        };
        for k in 0..=m {
            left.fs[2 * k] = seg.fs[k];
            right.fs[2 * k] = seg.fs[m + k];
        }
        for k in 0..m {
            left.fs[2 * k + 1] = f(node(left.a, left.b, 2 * k + 1, nodes));
            right.fs[2 * k + 1] = f(node(right.a, right.b, 2 * k + 1, nodes));
            evals += 2;
        }

        stack.push(right);
        stack.push(left);
    }

    Ok(IntegrationResult {
        value,
        error_estimate: error,
        n_function_calls: evals,
        n_subdivisions: splits,
        converged,
        diagnostics,
        leaves,
    })
}
