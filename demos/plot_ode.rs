// Harmonic oscillator solved with Dormand-Prince dense output.
// Prints JSON with 300 uniformly-sampled points on [0, 4π] plus the
// accepted step times:
//   {"t":[...], "x":[...], "v":[...], "steps":[...]}

use numint::ode::{dopri_solve, StepControl};

fn fmt_arr(v: &[f64]) -> String {
    let inner: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", inner.join(","))
}

fn main() {
    let tau = 4.0 * std::f64::consts::PI;

    let settings = StepControl {
        dense_output: true,
        ..StepControl::default()
    };

    let sol = dopri_solve(|_t, y: &[f64; 2]| [y[1], -y[0]], (0.0, tau), &[1.0, 0.0], &settings)
        .expect("ODE integration failed");

    const N: usize = 300;
    let mut t_vals = vec![0.0_f64; N];
    let mut x_vals = vec![0.0_f64; N];
    let mut v_vals = vec![0.0_f64; N];

    for i in 0..N {
        let t = tau * (i as f64) / (N - 1) as f64;
        let y = sol.interpolate(t).expect("interpolation failed");
        t_vals[i] = t;
        x_vals[i] = y[0];
        v_vals[i] = y[1];
    }

    eprintln!(
        "accepted {} rejected {} evals {}",
        sol.accepted, sol.rejected, sol.evals
    );
    println!(
        "{{\"t\":{},\"x\":{},\"v\":{},\"steps\":{}}}",
        fmt_arr(&t_vals),
        fmt_arr(&x_vals),
        fmt_arr(&v_vals),
        fmt_arr(&sol.t)
    );
}
