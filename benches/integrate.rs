use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use numint::ode::{dopri_solve, rk4, BogackiShampine32, EmbeddedRK, Fehlberg45, StepControl};
use numint::quad::{adaptive_integrate, romberg_integrate, simpson, AdaptiveSettings, RombergSettings, Rule};

// ---------------------------------------------------------------------------
// Quadrature
// ---------------------------------------------------------------------------

fn quad_smooth(c: &mut Criterion) {
    let mut g = c.benchmark_group("quad_exp_sin");
    let f = |x: f64| x.exp() * x.sin();

    g.bench_function("adaptive_simpson", |b| {
        let s = AdaptiveSettings::default();
        b.iter(|| adaptive_integrate(f, black_box(0.0), black_box(3.0), &s).unwrap())
    });

    g.bench_function("adaptive_trapezoid", |b| {
        let s = AdaptiveSettings { rule: Rule::Trapezoid, tol: 1e-6, ..AdaptiveSettings::default() };
        b.iter(|| adaptive_integrate(f, black_box(0.0), black_box(3.0), &s).unwrap())
    });

    g.bench_function("romberg", |b| {
        let s = RombergSettings::default();
        b.iter(|| romberg_integrate(f, black_box(0.0), black_box(3.0), &s).unwrap())
    });

    g.bench_function("composite_simpson_256", |b| {
        b.iter(|| simpson(f, black_box(0.0), black_box(3.0), 256).unwrap())
    });

    g.finish();
}

fn quad_kink(c: &mut Criterion) {
    let mut g = c.benchmark_group("quad_abs_kink");
    let f = |x: f64| (x - 1.0 / 3.0).abs();

    g.bench_function("adaptive_simpson", |b| {
        let s = AdaptiveSettings { tol: 1e-10, max_depth: 40, ..AdaptiveSettings::default() };
        b.iter(|| adaptive_integrate(f, black_box(0.0), black_box(1.0), &s).unwrap())
    });

    g.bench_function("romberg", |b| {
        let s = RombergSettings { max_levels: 16, tol: Some(1e-10) };
        b.iter(|| romberg_integrate(f, black_box(0.0), black_box(1.0), &s).unwrap())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// ODE: Van der Pol oscillator, mu = 1
// ---------------------------------------------------------------------------

fn vdp(_t: f64, y: &[f64; 2]) -> [f64; 2] {
    [y[1], (1.0 - y[0] * y[0]) * y[1] - y[0]]
}

fn ode_vdp(c: &mut Criterion) {
    let mut g = c.benchmark_group("ode_van_der_pol");
    let s = StepControl { atol: 1e-8, rtol: 1e-8, ..StepControl::default() };
    let y0 = [2.0, 0.0];

    g.bench_function("dopri5", |b| {
        b.iter(|| dopri_solve(vdp, (0.0, black_box(10.0)), &y0, &s).unwrap())
    });

    g.bench_function("rkf45", |b| {
        b.iter(|| Fehlberg45::solve(vdp, (0.0, black_box(10.0)), &y0, &s).unwrap())
    });

    g.bench_function("bs23", |b| {
        let s = StepControl { max_steps: 100_000, ..s };
        b.iter(|| BogackiShampine32::solve(vdp, (0.0, black_box(10.0)), &y0, &s).unwrap())
    });

    g.bench_function("rk4_fixed_1e-3", |b| {
        b.iter(|| rk4(0.0, black_box(10.0), 1e-3, &y0, vdp))
    });

    g.bench_function("dopri5_dense_vec", |b| {
        let s = StepControl { dense_output: true, ..s };
        let y0 = vec![2.0, 0.0];
        b.iter(|| {
            dopri_solve(
                |_t, y: &Vec<f64>| vec![y[1], (1.0 - y[0] * y[0]) * y[1] - y[0]],
                (0.0, black_box(10.0)),
                &y0,
                &s,
            )
            .unwrap()
        })
    });

    g.finish();
}

criterion_group!(benches, quad_smooth, quad_kink, ode_vdp);
criterion_main!(benches);
