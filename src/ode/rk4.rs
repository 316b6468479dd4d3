use core::convert::Infallible;

use crate::traits::{cst, FloatScalar, OdeState};

/// Single step of the classic 4th-order Runge-Kutta method.
///
/// Advances `y` from `t` to `t + h` using `f(t, y) -> dy/dt`.
///
/// ```
/// use numint::ode::rk4_step;
///
/// // dy/dt = -y (exponential decay), scalar state
/// let y1 = rk4_step(0.0, &1.0_f64, 0.01, |_t, y: &f64| -*y);
/// assert!((y1 - (-0.01_f64).exp()).abs() < 1e-10);
/// ```
///
/// # Panics
///
/// With a `Vec<T>` state, panics if `f` returns a vector of a different
/// length than `y`. The adaptive solvers report this as
/// [`OdeError::DimensionMismatch`](super::OdeError::DimensionMismatch)
/// instead.
pub fn rk4_step<T: FloatScalar, Y: OdeState<T>>(
    t: T,
    y: &Y,
    h: T,
    mut f: impl FnMut(T, &Y) -> Y,
) -> Y {
    match rk4_stages(t, y, h, |ts, ys| Ok::<Y, Infallible>(f(ts, ys))) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// RK4 step over a fallible right-hand side; the first error aborts the step.
pub(crate) fn rk4_stages<T: FloatScalar, Y: OdeState<T>, E>(
    t: T,
    y: &Y,
    h: T,
    mut f: impl FnMut(T, &Y) -> Result<Y, E>,
) -> Result<Y, E> {
    let half_h = h * cst(0.5);
    let sixth_h = h / cst(6.0);
    let third_h = h / cst(3.0);

    let k1 = f(t, y)?;
    let k2 = f(t + half_h, &y.add_scaled(half_h, &k1))?;
    let k3 = f(t + half_h, &y.add_scaled(half_h, &k2))?;
    let k4 = f(t + h, &y.add_scaled(h, &k3))?;

    let mut out = y.clone();
    out.axpy(sixth_h, &k1);
    out.axpy(third_h, &k2);
    out.axpy(third_h, &k3);
    out.axpy(sixth_h, &k4);
    Ok(out)
}

/// Integrate an ODE using fixed-step 4th-order Runge-Kutta.
///
/// Returns the final state at `tf`. The magnitude of `dt` is used and its
/// sign follows the direction of integration; the last step is shortened to
/// land on `tf`. A zero `dt` or `t0 == tf` returns `y0` unchanged.
///
/// ```
/// use numint::ode::rk4;
///
/// // Harmonic oscillator: y'' = -y  →  [y, y']
/// let yf = rk4(0.0, std::f64::consts::TAU, 0.001, &[1.0_f64, 0.0],
///     |_t, y: &[f64; 2]| [y[1], -y[0]],
/// );
/// assert!((yf[0] - 1.0).abs() < 1e-8);
/// assert!((yf[1]).abs() < 1e-8);
/// ```
///
/// # Panics
///
/// Same as [`rk4_step`]: a `Vec<T>` state whose length `f` changes.
pub fn rk4<T: FloatScalar, Y: OdeState<T>>(
    t0: T,
    tf: T,
    dt: T,
    y0: &Y,
    mut f: impl FnMut(T, &Y) -> Y,
) -> Y {
    let mut t = t0;
    let mut y = y0.clone();
    if t0 == tf || dt == T::zero() || !dt.is_finite() {
        return y;
    }
    let tdir = if tf > t0 { T::one() } else { -T::one() };
    let mut h = dt.abs() * tdir;

    loop {
        // Clamp last step
        let last = (tdir > T::zero() && t + h >= tf) || (tdir < T::zero() && t + h <= tf);
        if last {
            h = tf - t;
        }

        y = rk4_step(t, &y, h, &mut f);
        t = t + h;

        if last {
            break;
        }
    }

    y
}
