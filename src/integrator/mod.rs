//! Fixed-step integrator for the damped linear oscillator.
//!
//! The oscillator `m x'' + c x' + k x = 0` is integrated in state-space form:
//!
//! ```text
//! x' = v
//! v' = -(c/m) v - (k/m) x
//! ```
//!
//! ## Decay duration
//!
//! The amplitude envelope of the free response is `exp(-ζ ω_n t)` with
//!
//! ```text
//! ω_n = sqrt(k/m)
//! ζ   = c / (2 sqrt(m k))
//! ```
//!
//! A run covers the time for the envelope to fall to [`DECAY_FRACTION`]
//! of its initial value, `-ln(0.01) / (ζ ω_n)`. This is undefined for an
//! undamped system, which is rejected with a domain error.
//!
//! ## Time stepping
//!
//! Each step applies Heun's method (explicit trapezoidal predictor-corrector),
//! which is second-order accurate. There is no adaptive step control; the
//! step count is `ceil(duration / dt)` and is capped at
//! [`SimulatorConfig::max_steps`].

mod duration;
mod heun;
mod simulate;

pub use duration::{derive_duration, DampingRegime, DerivedQuantities};
pub use heun::{accel, step};
pub use simulate::{simulate, Sample, Simulator, SimulatorConfig, Trajectory};

/// Fraction of the initial amplitude at which a run ends.
pub const DECAY_FRACTION: f64 = 0.01;

/// Default cap on the number of integration steps per run.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Default magnitude above which |x| or |v| is treated as numeric overflow.
pub const DEFAULT_OVERFLOW_THRESHOLD: f64 = 1e150;

/// Tolerance on |ζ - 1| for classifying a system as critically damped.
pub const CRITICAL_DAMPING_TOLERANCE: f64 = 1e-9;
