use alloc::vec::Vec;
use core::fmt::Debug;
use num_traits::{Float, One, Zero};

/// Trait for floating-point elements accepted by every routine in the crate.
///
/// Blanket-implemented for all types satisfying the bounds, in practice
/// `f32` and `f64`. Constants are converted with `T::from(c)`, which cannot
/// fail for finite `f64` literals into either type.
pub trait FloatScalar: Copy + PartialEq + Debug + Zero + One + Float {}

impl<T: Copy + PartialEq + Debug + Zero + One + Float> FloatScalar for T {}

/// Convert an `f64` constant into `T`.
///
/// Only used with finite literals, which every `Float` type can represent.
#[inline]
pub(crate) fn cst<T: FloatScalar>(c: f64) -> T {
    T::from(c).expect("finite f64 constant converts to any Float")
}

/// State vector of an ODE initial value problem.
///
/// The adaptive solvers only need vector-space operations on the state plus
/// componentwise access for the error norm. Implemented for bare `f32` /
/// `f64` (scalar problems), fixed-size `[T; N]` arrays (stack-allocated),
/// and `Vec<T>` (runtime dimension).
///
/// ```
/// use numint::OdeState;
///
/// let mut y = [1.0_f64, 2.0];
/// y.axpy(0.5, &[2.0, 2.0]);
/// assert_eq!(y, [2.0, 3.0]);
/// assert_eq!(OdeState::<f64>::dim(&y), 2);
/// ```
pub trait OdeState<T: FloatScalar>: Clone {
    /// Number of components.
    fn dim(&self) -> usize;

    /// Component `i` (`i < dim()`).
    fn component(&self, i: usize) -> T;

    /// In-place `self += a * x`.
    fn axpy(&mut self, a: T, x: &Self);

    /// In-place `self *= a`.
    fn scale(&mut self, a: T);

    /// `self + a * x` as a new state.
    fn add_scaled(&self, a: T, x: &Self) -> Self {
        let mut out = self.clone();
        out.axpy(a, x);
        out
    }

    /// `true` if every component is finite.
    fn is_finite(&self) -> bool {
        (0..self.dim()).all(|i| self.component(i).is_finite())
    }
}

macro_rules! impl_ode_state_scalar {
    ($($t:ty),*) => {
        $(
            impl OdeState<$t> for $t {
                #[inline] fn dim(&self) -> usize { 1 }
                #[inline] fn component(&self, _i: usize) -> $t { *self }
                #[inline] fn axpy(&mut self, a: $t, x: &$t) { *self += a * *x; }
                #[inline] fn scale(&mut self, a: $t) { *self *= a; }
            }
        )*
    };
}

impl_ode_state_scalar!(f32, f64);

impl<T: FloatScalar, const N: usize> OdeState<T> for [T; N] {
    #[inline]
    fn dim(&self) -> usize {
        N
    }

    #[inline]
    fn component(&self, i: usize) -> T {
        self[i]
    }

    fn axpy(&mut self, a: T, x: &Self) {
        for (yi, xi) in self.iter_mut().zip(x.iter()) {
            *yi = *yi + a * *xi;
        }
    }

    fn scale(&mut self, a: T) {
        for yi in self.iter_mut() {
            *yi = *yi * a;
        }
    }
}

impl<T: FloatScalar> OdeState<T> for Vec<T> {
    #[inline]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline]
    fn component(&self, i: usize) -> T {
        self[i]
    }

    /// Panics on length mismatch; the solvers check dimensions before
    /// combining states.
    fn axpy(&mut self, a: T, x: &Self) {
        assert_eq!(self.len(), x.len(), "state dimension mismatch");
        for (yi, xi) in self.iter_mut().zip(x.iter()) {
            *yi = *yi + a * *xi;
        }
    }

    fn scale(&mut self, a: T) {
        for yi in self.iter_mut() {
            *yi = *yi * a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn constants_convert() {
        assert_eq!(cst::<f64>(0.1), 0.1);
        assert_eq!(cst::<f32>(0.1), 0.1_f32);
        assert_eq!(cst::<f32>(-6.0), -6.0_f32);
    }

    #[test]
    fn scalar_state() {
        let mut y = 1.5_f64;
        y.axpy(2.0, &0.25);
        assert_eq!(y, 2.0);
        assert_eq!(OdeState::<f64>::dim(&y), 1);
        assert_eq!(y.add_scaled(-1.0, &2.0), 0.0);
    }

    #[test]
    fn vec_state_scale() {
        let mut y = vec![1.0_f32, -2.0, 4.0];
        y.scale(0.5);
        assert_eq!(y, vec![0.5, -1.0, 2.0]);
        assert!(OdeState::<f32>::is_finite(&y));
        y[1] = f32::NAN;
        assert!(!OdeState::<f32>::is_finite(&y));
    }

    #[test]
    #[should_panic(expected = "state dimension mismatch")]
    fn vec_state_mismatch_panics() {
        let mut y = vec![1.0_f64, 2.0];
        y.axpy(1.0, &vec![1.0]);
    }
}
