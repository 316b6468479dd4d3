use super::*;

#[test]
fn forward_difference_linear_accuracy() {
    let d = forward_difference(|x: f64| x * x, 3.0, 1e-6);
    assert!((d - 6.0).abs() < 1e-5);
}

#[test]
fn central_difference_exact_for_quadratic() {
    // Central differences cancel the h² term of a quadratic exactly
    let d = central_difference(|x: f64| 4.0 * x * x - x, 0.5, 0.25);
    assert!((d - 3.0).abs() < 1e-14);
}

#[test]
fn second_difference_cubic() {
    // f'' = 6x for x³
    let d2 = second_difference(|x: f64| x * x * x, 2.0, 1e-3);
    assert!((d2 - 12.0).abs() < 1e-5);
}

#[test]
fn richardson_sin() {
    let d = richardson_derivative(|x: f64| x.sin(), 1.0, &DerivativeSettings::default()).unwrap();
    assert!(d.converged);
    assert!((d.value - 1.0_f64.cos()).abs() < 1e-10);
    assert_eq!(d.evals, 2 * d.levels);
}

#[test]
fn richardson_beats_plain_central() {
    let f = |x: f64| (2.0 * x).exp();
    let exact = 2.0 * 2.0_f64.exp();
    let plain = central_difference(f, 1.0, 0.1);
    let d = richardson_derivative(f, 1.0, &DerivativeSettings::default()).unwrap();
    assert!((d.value - exact).abs() < (plain - exact).abs() * 1e-4);
}

#[test]
fn richardson_single_level() {
    let settings = DerivativeSettings { levels: 1, ..DerivativeSettings::default() };
    let d = richardson_derivative(|x: f64| x * x, 1.0, &settings).unwrap();
    assert!(!d.converged);
    assert!(d.error_estimate.is_infinite());
    assert!((d.value - 2.0).abs() < 1e-14);
}

#[test]
fn richardson_f32() {
    let d = richardson_derivative(|x: f32| x.cos(), 0.5, &DerivativeSettings::<f32>::default())
        .unwrap();
    assert!((d.value + 0.5_f32.sin()).abs() < 1e-3);
}

#[test]
fn richardson_invalid_settings() {
    let f = |x: f64| x;
    let s = DerivativeSettings { h0: 0.0, ..DerivativeSettings::default() };
    assert_eq!(richardson_derivative(f, 0.0, &s).unwrap_err(), DiffError::InvalidStep);
    let s = DerivativeSettings { tol: -1.0, ..DerivativeSettings::default() };
    assert_eq!(richardson_derivative(f, 0.0, &s).unwrap_err(), DiffError::InvalidTolerance);
    let s = DerivativeSettings { levels: 0, ..DerivativeSettings::default() };
    assert_eq!(richardson_derivative(f, 0.0, &s).unwrap_err(), DiffError::InvalidLevels);
}
