use crate::traits::{cst, FloatScalar};

use super::{check_bounds, QuadError};

/// Base rule pair used by [`adaptive_integrate`](super::adaptive_integrate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rule {
    /// One-panel trapezoid vs. two-panel trapezoid.
    Trapezoid,
    /// Simpson on `a, mid, b` vs. composite Simpson with quarter points.
    #[default]
    Simpson,
}

/// Coarse and refined estimates over `2m + 1` equally spaced samples.
///
/// `coarse` reads only the even-indexed samples; `refined` reads all of them.
/// Both take the signed segment width `h = b - a`.
#[derive(Clone, Copy)]
pub struct RulePair<T> {
    /// Samples per segment, `2m + 1`.
    pub nodes: usize,
    /// Low-order estimate.
    pub coarse: fn(T, &[T]) -> T,
    /// High-order estimate.
    pub refined: fn(T, &[T]) -> T,
}

impl<T> core::fmt::Debug for RulePair<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RulePair").field("nodes", &self.nodes).finish()
    }
}

/// Largest `nodes` of any rule pair.
pub(crate) const MAX_NODES: usize = 5;

impl Rule {
    /// Look up the rule pair for this variant.
    pub fn pair<T: FloatScalar>(self) -> RulePair<T> {
        match self {
            Rule::Trapezoid => RulePair {
                nodes: 3,
                coarse: trap_coarse,
                refined: trap_refined,
            },
            Rule::Simpson => RulePair {
                nodes: 5,
                coarse: simpson_coarse,
                refined: simpson_refined,
            },
        }
    }
}

fn trap_coarse<T: FloatScalar>(h: T, fs: &[T]) -> T {
    h * (fs[0] + fs[2]) * cst(0.5)
}

fn trap_refined<T: FloatScalar>(h: T, fs: &[T]) -> T {
    h * (fs[0] + fs[1] * cst(2.0) + fs[2]) * cst(0.25)
}

fn simpson_coarse<T: FloatScalar>(h: T, fs: &[T]) -> T {
    h * (fs[0] + fs[2] * cst(4.0) + fs[4]) / cst(6.0)
}

fn simpson_refined<T: FloatScalar>(h: T, fs: &[T]) -> T {
    let four = cst::<T>(4.0);
    h * (fs[0] + fs[1] * four + fs[2] * cst(2.0) + fs[3] * four + fs[4]) / cst(12.0)
}

/// Composite trapezoid rule with `n` equal panels.
///
/// Exact for linear integrands. Reversed bounds give the negated integral.
///
/// # Errors
///
/// [`QuadError::InvalidPanels`] if `n == 0`, [`QuadError::NonFiniteBounds`]
/// if a bound is not finite.
///
/// # Example
///
/// ```
/// use numint::quad::trapezoid;
///
/// let v = trapezoid(|x: f64| 3.0 * x + 1.0, 0.0, 2.0, 4).unwrap();
/// assert!((v - 8.0).abs() < 1e-14);
/// ```
pub fn trapezoid<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    n: usize,
) -> Result<T, QuadError> {
    check_bounds(a, b)?;
    if n == 0 {
        return Err(QuadError::InvalidPanels);
    }
    let nt = T::from(n).ok_or(QuadError::InvalidPanels)?;
    let h = (b - a) / nt;
    let mut sum = (f(a) + f(b)) * cst(0.5);
    for i in 1..n {
        let x = a + h * T::from(i).ok_or(QuadError::InvalidPanels)?;
        sum = sum + f(x);
    }
    Ok(sum * h)
}

/// Composite Simpson rule with `n` equal panels (`n` even).
///
/// Exact for polynomials up to degree 3.
///
/// # Errors
///
/// [`QuadError::InvalidPanels`] if `n` is zero or odd,
/// [`QuadError::NonFiniteBounds`] if a bound is not finite.
///
/// # Example
///
/// ```
/// use numint::quad::simpson;
///
/// // ∫₀² x³ dx = 4
/// let v = simpson(|x: f64| x * x * x, 0.0, 2.0, 2).unwrap();
/// assert!((v - 4.0).abs() < 1e-14);
/// ```
pub fn simpson<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    n: usize,
) -> Result<T, QuadError> {
    check_bounds(a, b)?;
    if n == 0 || n % 2 != 0 {
        return Err(QuadError::InvalidPanels);
    }
    let nt = T::from(n).ok_or(QuadError::InvalidPanels)?;
    let h = (b - a) / nt;
    let two = cst::<T>(2.0);
    let four = cst::<T>(4.0);
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + h * T::from(i).ok_or(QuadError::InvalidPanels)?;
        sum = sum + f(x) * if i % 2 == 1 { four } else { two };
    }
    Ok(sum * h / cst(3.0))
}
