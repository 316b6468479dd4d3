//! Richardson extrapolation on sequences with an even-power error expansion.
//!
//! Both Romberg integration (trapezoid rule) and the central-difference
//! derivative have error series in `h², h⁴, h⁶, …`, so halving `h` and
//! combining neighbouring estimates eliminates one term per column.

use alloc::vec::Vec;

use crate::traits::{cst, FloatScalar};

/// Fill `row[1..]` from `row[0]` and the previous (shorter) row.
///
/// `row` has length `prev.len() + 1` and `row[0]` must already hold the
/// new base estimate. Column `j` eliminates the `O(h^{2j})` term:
///
/// `R[i][j] = R[i][j-1] + (R[i][j-1] - R[i-1][j-1]) / (4^j - 1)`
///
/// A zero denominator cannot occur for `j ≥ 1`; if it ever did the division
/// yields ±∞ / NaN, which propagates into the result.
pub(crate) fn richardson_row<T: FloatScalar>(prev: &[T], row: &mut [T]) {
    debug_assert_eq!(row.len(), prev.len() + 1);
    let four = cst::<T>(4.0);
    let mut pow4 = T::one();
    for j in 1..row.len() {
        pow4 = pow4 * four;
        let denom = pow4 - T::one();
        row[j] = row[j - 1] + (row[j - 1] - prev[j - 1]) / denom;
    }
}

/// Start a new row of length `prev.len() + 1` seeded with `base`, and
/// extrapolate it against `prev`.
pub(crate) fn next_row<T: FloatScalar>(prev: &[T], base: T) -> Vec<T> {
    let mut row = alloc::vec![T::zero(); prev.len() + 1];
    row[0] = base;
    richardson_row(prev, &mut row);
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn eliminates_h_squared_term() {
        // A(h) = 1 + h² : A(1) = 2, A(1/2) = 1.25 → extrapolated value 1
        let row = next_row(&[2.0_f64], 1.25);
        assert_eq!(row.len(), 2);
        assert!((row[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn eliminates_h_fourth_term() {
        // A(h) = 3 + h² + h⁴ sampled at h = 1, 1/2, 1/4
        let a = |h: f64| 3.0 + h * h + h.powi(4);
        let r0 = vec![a(1.0)];
        let r1 = next_row(&r0, a(0.5));
        let r2 = next_row(&r1, a(0.25));
        assert!((r2[2] - 3.0).abs() < 1e-14);
    }

    #[test]
    fn nan_propagates() {
        let row = next_row(&[f64::NAN], 1.0);
        assert!(row[1].is_nan());
    }
}
