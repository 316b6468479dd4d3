//! # numint
//!
//! Pure-Rust adaptive numerical integration, no-std compatible (with `alloc`).
//! Quadrature with local error control, Romberg extrapolation, and embedded
//! Runge-Kutta ODE solvers with automatic step-size selection.
//!
//! ## Quick start
//!
//! ```
//! use numint::quad::{adaptive_integrate, AdaptiveSettings};
//!
//! // ∫₀^π sin(x) dx = 2
//! let r = adaptive_integrate(|x: f64| x.sin(), 0.0, core::f64::consts::PI,
//!     &AdaptiveSettings::default()).unwrap();
//! assert!(r.converged);
//! assert!((r.value - 2.0).abs() < 1e-8);
//! ```
//!
//! ## Modules
//!
//! - [`quad`]: Adaptive subdivision ([`quad::adaptive_integrate`]) with a
//!   trapezoid or Simpson rule pair, Romberg extrapolation
//!   ([`quad::romberg_integrate`], [`quad::romberg_table`]), and composite
//!   fixed rules ([`quad::trapezoid`], [`quad::simpson`]). All return an
//!   [`quad::IntegrationResult`] carrying a `converged` flag and structured
//!   diagnostics instead of printing warnings.
//!
//! - [`ode`]: Dormand-Prince 5(4) ([`ode::dopri_solve`]), Fehlberg 4(5), and
//!   Bogacki-Shampine 3(2) embedded pairs behind the [`ode::EmbeddedRK`] trait, fixed-step RK4,
//!   and cubic Hermite dense output. Requires `ode` feature.
//!
//! - [`diff`]: Forward, central, and second differences plus a
//!   Richardson-extrapolated derivative sharing the Romberg column recurrence.
//!
//! - [`traits`]: [`FloatScalar`] element bound (`f32` / `f64`) and the
//!   [`OdeState`] trait implemented for scalars, `[T; N]`, and `Vec<T>`.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`    | no       | Pure-Rust software float fallback for `no_std` targets |
//! | `ode`     | yes      | ODE integration (RK4, adaptive embedded pairs) |
//! | `all`     | no       | All features: `std` + `ode` |
//!
//! Without `std`, enable `libm` so that `num_traits::Float` is available.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod diff;
pub(crate) mod extrapolate;
#[cfg(feature = "ode")]
pub mod ode;
pub mod quad;
pub mod traits;

pub use traits::{FloatScalar, OdeState};

pub use quad::{adaptive_integrate, romberg_integrate, IntegrationResult, Rule};
#[cfg(feature = "ode")]
pub use ode::{dopri_solve, StepControl, Trajectory};
