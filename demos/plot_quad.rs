// Adaptive Simpson on a function with a sharp peak at x = 0.3.
// Prints JSON with the accepted subintervals and their local errors:
//   {"value":..., "converged":..., "a":[...], "b":[...], "depth":[...], "error":[...]}

use numint::quad::{adaptive_integrate, AdaptiveSettings};

fn fmt_arr<T: std::fmt::Display>(v: &[T]) -> String {
    let inner: Vec<String> = v.iter().map(|x| format!("{x}")).collect();
    format!("[{}]", inner.join(","))
}

fn main() {
    let f = |x: f64| 1.0 / (1e-3 + (x - 0.3) * (x - 0.3)) + x.sin();

    let settings = AdaptiveSettings {
        tol: 1e-6,
        record_leaves: true,
        ..AdaptiveSettings::default()
    };
    let r = adaptive_integrate(f, 0.0, 1.0, &settings).expect("quadrature failed");
    let leaves = r.leaves.as_deref().unwrap_or(&[]);

    let a: Vec<f64> = leaves.iter().map(|l| l.a).collect();
    let b: Vec<f64> = leaves.iter().map(|l| l.b).collect();
    let depth: Vec<usize> = leaves.iter().map(|l| l.depth).collect();
    let error: Vec<f64> = leaves.iter().map(|l| l.error).collect();

    eprintln!(
        "evals {} splits {} diagnostics {}",
        r.n_function_calls,
        r.n_subdivisions,
        r.diagnostics.len()
    );
    println!(
        "{{\"value\":{},\"converged\":{},\"a\":{},\"b\":{},\"depth\":{},\"error\":{}}}",
        r.value,
        r.converged,
        fmt_arr(&a),
        fmt_arr(&b),
        fmt_arr(&depth),
        fmt_arr(&error)
    );
}
