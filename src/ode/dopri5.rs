use super::{EmbeddedRK, OdeError, StepControl, Trajectory};
use crate::traits::{FloatScalar, OdeState};

/// Dormand-Prince 5(4) embedded pair, 7 stages with FSAL.
///
/// The 5th-order solution is propagated and the 4th-order one drives the
/// error estimate. Because the last stage is evaluated at the accepted
/// state, each accepted step costs 6 new evaluations.
///
/// > J. R. Dormand and P. J. Prince, "A family of embedded Runge-Kutta
/// > formulae," *J. Comput. Appl. Math.*, vol. 6, no. 1, pp. 19–26, 1980.
pub struct DormandPrince45;

impl EmbeddedRK<7> for DormandPrince45 {
    const A: [[f64; 7]; 7] = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0, 0.0],
        [
            19372.0 / 6561.0,
            -25360.0 / 2187.0,
            64448.0 / 6561.0,
            -212.0 / 729.0,
            0.0,
            0.0,
            0.0,
        ],
        [
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
            0.0,
            0.0,
        ],
        [
            35.0 / 384.0,
            0.0,
            500.0 / 1113.0,
            125.0 / 192.0,
            -2187.0 / 6784.0,
            11.0 / 84.0,
            0.0,
        ],
    ];

    const B: [f64; 7] = [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ];

    const BHAT: [f64; 7] = [
        5179.0 / 57600.0,
        0.0,
        7571.0 / 16695.0,
        393.0 / 640.0,
        -92097.0 / 339200.0,
        187.0 / 2100.0,
        1.0 / 40.0,
    ];

    const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

    const ORDER: usize = 5;
    const FSAL: bool = true;
}

/// Solve `dy/dt = f(t, y)` on `t_span` with the Dormand-Prince 5(4) pair.
///
/// Shorthand for [`DormandPrince45::solve`](EmbeddedRK::solve). The state
/// may be a bare `f64` / `f32`, a `[T; N]`, or a `Vec<T>`.
///
/// # Example
///
/// ```
/// use numint::ode::{dopri_solve, StepControl};
///
/// // y' = -2y, y(0) = 1 → y(2) = e^{-4}
/// let sol = dopri_solve(|_t, y: &f64| -2.0 * y, (0.0, 2.0), &1.0, &StepControl::default()).unwrap();
/// let (tf, yf) = sol.last();
/// assert_eq!(tf, 2.0);
/// assert!(sol.reached_end);
/// assert!((yf - (-4.0_f64).exp()).abs() < 1e-4);
/// ```
pub fn dopri_solve<T: FloatScalar, Y: OdeState<T>>(
    f: impl FnMut(T, &Y) -> Y,
    t_span: (T, T),
    y0: &Y,
    settings: &StepControl<T>,
) -> Result<Trajectory<T, Y>, OdeError> {
    DormandPrince45::solve(f, t_span, y0, settings)
}
