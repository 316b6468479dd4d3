//! Properties of the adaptive embedded Runge-Kutta solvers.

#![cfg(feature = "ode")]

use numint::ode::{dopri_solve, BogackiShampine32, EmbeddedRK, OdeDiagnostic, StepControl};

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
}

#[test]
fn exponential_decay_lands_exactly() {
    let settings = StepControl::default();
    let sol = dopri_solve(|_t, y: &f64| -2.0 * *y, (0.0, 2.0), &1.0, &settings).unwrap();
    let (tf, yf) = sol.last();
    assert_eq!(tf, 2.0);
    let exact = (-4.0_f64).exp();
    assert!((yf - exact).abs() <= settings.atol + settings.rtol * exact);
}

#[test]
fn step_accounting() {
    let problems: [(f64, StepControl<f64>); 3] = [
        (10.0, StepControl::default()),
        (10.0, StepControl { atol: 1e-10, rtol: 1e-10, initial_step: Some(3.0), ..StepControl::default() }),
        (3.0, StepControl { atol: 1e-14, rtol: 1e-14, min_step: 0.25, ..StepControl::default() }),
    ];
    for (tf, settings) in problems {
        let sol = dopri_solve(|t: f64, y: &[f64; 2]| [y[1], -y[0] + t.sin()], (0.0, tf), &[1.0, 0.0], &settings)
            .unwrap();
        assert!(sol.reached_end);
        assert_eq!(sol.t.len(), sol.accepted + 1);
        assert_eq!(sol.accepted + sol.rejected, sol.attempts);
        let forced = sol
            .diagnostics
            .iter()
            .filter(|d| matches!(d, OdeDiagnostic::MinStepForced { .. }))
            .count();
        assert_eq!(forced, sol.forced);
    }
}

#[test]
fn bs23_agrees_with_dopri() {
    let settings = StepControl { atol: 1e-10, rtol: 1e-10, max_steps: 200_000, ..StepControl::default() };
    // Van der Pol, mildly nonlinear
    let vdp = |_t: f64, y: &[f64; 2]| [y[1], (1.0 - y[0] * y[0]) * y[1] - y[0]];
    let d = dopri_solve(vdp, (0.0, 5.0), &[2.0, 0.0], &settings).unwrap();
    let b = BogackiShampine32::solve(vdp, (0.0, 5.0), &[2.0, 0.0], &settings).unwrap();
    let (_, yd) = d.last();
    let (_, yb) = b.last();
    assert_near(yd[0], yb[0], 1e-6, "y");
    assert_near(yd[1], yb[1], 1e-6, "y'");
    assert!(b.accepted > d.accepted);
}
