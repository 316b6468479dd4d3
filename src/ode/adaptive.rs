use alloc::vec::Vec;

use crate::traits::{cst, FloatScalar, OdeState};

use super::rk4::rk4_stages;
use super::{OdeDiagnostic, OdeError, Trajectory};

/// Settings for adaptive step-size control.
#[derive(Debug, Clone, Copy)]
pub struct StepControl<T> {
    /// Absolute error tolerance (default: 1e-6).
    pub atol: T,
    /// Relative error tolerance (default: 1e-3).
    pub rtol: T,
    /// First step size; `None` picks one from the initial derivative
    /// (default: `None`).
    pub initial_step: Option<T>,
    /// Minimum allowed step size (default: 1e-10).
    pub min_step: T,
    /// Maximum allowed step size; `None` means `|tf - t0|` (default: `None`).
    pub max_step: Option<T>,
    /// Maximum number of step attempts, accepted or rejected (default: 10_000).
    pub max_steps: usize,
    /// Safety factor for step-size controller (default: 0.9).
    pub safety: T,
    /// Minimum step-size decrease factor (default: 0.2).
    pub min_factor: T,
    /// Maximum step-size increase factor (default: 10.0).
    pub max_factor: T,
    /// Whether to store derivatives for [`Trajectory::interpolate`]
    /// (default: false).
    pub dense_output: bool,
}

impl Default for StepControl<f64> {
    fn default() -> Self {
        Self {
            atol: 1e-6,
            rtol: 1e-3,
            initial_step: None,
            min_step: 1e-10,
            max_step: None,
            max_steps: 10_000,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 10.0,
            dense_output: false,
        }
    }
}

impl Default for StepControl<f32> {
    fn default() -> Self {
        Self {
            atol: 1e-4,
            rtol: 1e-3,
            initial_step: None,
            min_step: 1e-5,
            max_step: None,
            max_steps: 10_000,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 10.0,
            dense_output: false,
        }
    }
}

impl<T: FloatScalar> StepControl<T> {
    fn validate(&self) -> Result<(), OdeError> {
        let positive = |x: T| x > T::zero() && x.is_finite();
        if !positive(self.atol) || !positive(self.rtol) {
            return Err(OdeError::InvalidTolerance);
        }
        if !positive(self.min_step) {
            return Err(OdeError::InvalidStepBounds);
        }
        if let Some(max_step) = self.max_step {
            if !(max_step >= self.min_step) {
                return Err(OdeError::InvalidStepBounds);
            }
        }
        if let Some(h0) = self.initial_step {
            if !positive(h0) {
                return Err(OdeError::InvalidInitialStep);
            }
        }
        if self.max_steps == 0 {
            return Err(OdeError::InvalidMaxSteps);
        }
        if !positive(self.safety)
            || !positive(self.min_factor)
            || self.min_factor > T::one()
            || !(self.max_factor >= T::one())
        {
            return Err(OdeError::InvalidController);
        }
        Ok(())
    }
}

/// Scaled RMS norm: `sqrt(mean_i((e_i / sc_i)²))` with
/// `sc_i = atol + rtol · max(|a_i|, |b_i|)`.
fn scaled_rms<T: FloatScalar, Y: OdeState<T>>(
    e: impl Fn(usize) -> T,
    a: &Y,
    b: &Y,
    atol: T,
    rtol: T,
) -> T {
    let n = a.dim();
    if n == 0 {
        return T::zero();
    }
    let mut sum = T::zero();
    for i in 0..n {
        let sc = atol + rtol * a.component(i).abs().max(b.component(i).abs());
        let r = e(i) / sc;
        sum = sum + r * r;
    }
    (sum / cst(n as f64)).sqrt()
}

/// Evaluate `f(t, y)`, counting the call and checking the state dimension.
fn eval_rhs<T: FloatScalar, Y: OdeState<T>>(
    f: &mut impl FnMut(T, &Y) -> Y,
    t: T,
    y: &Y,
    dim: usize,
    evals: &mut usize,
) -> Result<Y, OdeError> {
    *evals += 1;
    let dy = f(t, y);
    if dy.dim() != dim {
        return Err(OdeError::DimensionMismatch);
    }
    Ok(dy)
}

/// Trait for adaptive embedded Runge-Kutta pairs.
///
/// Each solver is a zero-size struct that implements this trait with
/// const Butcher tableau coefficients. `STAGES` is the number of stages.
///
/// The coefficients are stored as `f64` even when integrating with `f32`;
/// they are compile-time constants converted at use sites.
///
/// The propagated solution is the higher-order one (local extrapolation);
/// the lower-order one only serves the error estimate.
pub trait EmbeddedRK<const STAGES: usize> {
    /// Butcher A matrix (strictly lower triangular).
    const A: [[f64; STAGES]; STAGES];
    /// Weights for the higher-order solution.
    const B: [f64; STAGES];
    /// Weights for the embedded lower-order solution.
    const BHAT: [f64; STAGES];
    /// Nodes (abscissae).
    const C: [f64; STAGES];
    /// Order of the higher-order method; the controller exponent is `1/ORDER`.
    const ORDER: usize;
    /// First Same As Last: the last stage is `f(t + h, y_next)`.
    const FSAL: bool;

    /// Integrate `dy/dt = f(t, y)` over `t_span = (t0, tf)` from `y0`.
    ///
    /// Every accepted step satisfies `err ≤ 1` in the scaled RMS norm, except
    /// steps forced at `min_step`, which are counted in
    /// [`Trajectory::forced`] and listed in the diagnostics. Rejected steps
    /// never reach the output. The final point is exactly `tf` unless the
    /// `max_steps` budget ran out first, or the step fell below the spacing
    /// of floating-point values at `t` (`reached_end = false` in both cases).
    /// Output times are strictly monotone.
    ///
    /// # Errors
    ///
    /// Precondition errors for invalid settings or span, before any
    /// evaluation of `f`. [`OdeError::DimensionMismatch`] if `f` changes the
    /// state dimension, [`OdeError::StepNotFinite`] if the error norm
    /// becomes NaN or infinite.
    fn solve<T: FloatScalar, Y: OdeState<T>>(
        mut f: impl FnMut(T, &Y) -> Y,
        t_span: (T, T),
        y0: &Y,
        settings: &StepControl<T>,
    ) -> Result<Trajectory<T, Y>, OdeError> {
        settings.validate()?;
        let (t0, tf) = t_span;
        if !t0.is_finite() || !tf.is_finite() {
            return Err(OdeError::NonFiniteSpan);
        }

        let dim = y0.dim();
        let mut out = Trajectory::start(t0, y0.clone());
        let mut dense: Option<Vec<Y>> = if settings.dense_output { Some(Vec::new()) } else { None };

        if t0 == tf {
            if let Some(ref mut d) = dense {
                d.push(eval_rhs(&mut f, t0, y0, dim, &mut out.evals)?);
            }
            out.dy = dense;
            out.reached_end = true;
            return Ok(out);
        }

        let one = T::one();
        let zero = T::zero();
        let tdir = if tf > t0 { one } else { -one };
        let span = (tf - t0).abs();
        let max_step = settings.max_step.unwrap_or(span);
        let clamp_step = |h_abs: T| -> T {
            if h_abs < settings.min_step {
                settings.min_step
            } else if h_abs > max_step {
                max_step
            } else {
                h_abs
            }
        };

        let mut t = t0;
        let mut y = y0.clone();
        let f0 = eval_rhs(&mut f, t0, y0, dim, &mut out.evals)?;
        if let Some(ref mut d) = dense {
            d.push(f0.clone());
        }

        // Initial step-size guess (Hairer, Nørsett & Wanner, Sec. II.4)
        let mut h = match settings.initial_step {
            Some(h0) => clamp_step(h0),
            None => {
                let d0 = scaled_rms(|i| y0.component(i), y0, y0, settings.atol, settings.rtol);
                let d1 = scaled_rms(|i| f0.component(i), y0, y0, settings.atol, settings.rtol);
                let h0 = if d0 < cst(1e-5) || d1 < cst(1e-5) {
                    cst(1e-6)
                } else {
                    cst::<T>(0.01) * d0 / d1
                };
                let h0 = if h0 > span { span } else { h0 };
                let y1 = y0.add_scaled(h0 * tdir, &f0);
                let f1 = eval_rhs(&mut f, t0 + h0 * tdir, &y1, dim, &mut out.evals)?;
                let d2 = scaled_rms(
                    |i| f1.component(i) - f0.component(i),
                    y0,
                    y0,
                    settings.atol,
                    settings.rtol,
                ) / h0;
                let dmax = if d1 > d2 { d1 } else { d2 };
                let h1 = if dmax <= cst(1e-15) {
                    let floor = cst::<T>(1e-6);
                    let scaled = h0 * cst(1e-3);
                    if scaled > floor { scaled } else { floor }
                } else {
                    (cst::<T>(0.01) / dmax).powf(one / cst(Self::ORDER as f64))
                };
                let h100 = h0 * cst(100.0);
                clamp_step(if h100 < h1 { h100 } else { h1 })
            }
        } * tdir;

        let exponent = -one / cst(Self::ORDER as f64);
        let mut k_first: Option<Y> = Some(f0);

        loop {
            let remaining = tf - t;
            if remaining.abs() <= settings.min_step {
                break;
            }
            if out.attempts >= settings.max_steps {
                out.diagnostics.push(OdeDiagnostic::MaxStepsReached { t });
                out.dy = dense;
                return Ok(out);
            }

            // Clamp step to not overshoot end
            let last = h.abs() >= remaining.abs();
            if last {
                h = remaining;
            }
            // Step with the width `t` actually moves by
            let t_new = if last { tf } else { t + h };
            h = t_new - t;
            if h == zero {
                out.diagnostics.push(OdeDiagnostic::StepUnderflow { t });
                out.dy = dense;
                return Ok(out);
            }
            out.attempts += 1;

            // k-stages; k1 survives rejections since (t, y) is unchanged
            let k1 = match k_first.take() {
                Some(k) => k,
                None => eval_rhs(&mut f, t, &y, dim, &mut out.evals)?,
            };
            let mut ks: Vec<Y> = Vec::with_capacity(STAGES);
            ks.push(k1);
            for s in 1..STAGES {
                let mut ys = y.clone();
                for j in 0..s {
                    let a_sj = Self::A[s][j];
                    if a_sj != 0.0 {
                        ys.axpy(cst::<T>(a_sj) * h, &ks[j]);
                    }
                }
                let ks_new = eval_rhs(&mut f, t + cst::<T>(Self::C[s]) * h, &ys, dim, &mut out.evals)?;
                ks.push(ks_new);
            }

            // Higher- and lower-order candidates from the same stages
            let mut y_high = y.clone();
            let mut y_low = y.clone();
            for (idx, ki) in ks.iter().enumerate() {
                if Self::B[idx] != 0.0 {
                    y_high.axpy(cst::<T>(Self::B[idx]) * h, ki);
                }
                if Self::BHAT[idx] != 0.0 {
                    y_low.axpy(cst::<T>(Self::BHAT[idx]) * h, ki);
                }
            }

            let err = scaled_rms(
                |i| y_high.component(i) - y_low.component(i),
                &y,
                &y_high,
                settings.atol,
                settings.rtol,
            );
            if !err.is_finite() {
                return Err(OdeError::StepNotFinite);
            }

            // h_new / h = safety · err^(-1/ORDER), doubled when err == 0
            let factor = {
                let raw = if err == zero {
                    cst(2.0)
                } else {
                    settings.safety * err.powf(exponent)
                };
                if raw < settings.min_factor {
                    settings.min_factor
                } else if raw > settings.max_factor {
                    settings.max_factor
                } else {
                    raw
                }
            };

            let at_floor = h.abs() <= settings.min_step;
            if err <= one || at_floor {
                // Accept step
                if err > one {
                    out.forced += 1;
                    out.diagnostics.push(OdeDiagnostic::MinStepForced { t, h, err });
                }
                t = t_new;
                y = y_high;
                out.accepted += 1;

                if Self::FSAL {
                    k_first = ks.pop();
                }
                if let Some(ref mut d) = dense {
                    let k = match k_first.take() {
                        Some(k) => k,
                        None => eval_rhs(&mut f, t, &y, dim, &mut out.evals)?,
                    };
                    d.push(k.clone());
                    k_first = Some(k);
                }
                out.t.push(t);
                out.y.push(y.clone());

                h = clamp_step(h.abs() * factor) * tdir;
            } else {
                // Reject: k1 is still valid for the retry
                out.rejected += 1;
                k_first = ks.into_iter().next();
                h = clamp_step(h.abs() * factor) * tdir;
            }
        }

        // Within min_step of tf: land exactly with one fixed RK4 step
        if t != tf {
            if out.attempts >= settings.max_steps {
                out.diagnostics.push(OdeDiagnostic::MaxStepsReached { t });
                out.dy = dense;
                return Ok(out);
            }
            out.attempts += 1;
            let h_land = tf - t;
            y = rk4_stages(t, &y, h_land, |ts, ys| {
                eval_rhs(&mut f, ts, ys, dim, &mut out.evals)
            })?;
            if !OdeState::is_finite(&y) {
                return Err(OdeError::StepNotFinite);
            }
            t = tf;
            out.accepted += 1;
            out.landing_step = true;
            if let Some(ref mut d) = dense {
                d.push(eval_rhs(&mut f, t, &y, dim, &mut out.evals)?);
            }
            out.t.push(t);
            out.y.push(y);
        }

        out.reached_end = true;
        out.dy = dense;
        Ok(out)
    }
}
