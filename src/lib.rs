//! # dampsim
//!
//! Fixed-step simulation of a damped mass-spring-damper oscillator.
//!
//! This library provides:
//! - Validated records describing the oscillator and its initial state
//! - The closed-form decay duration (time to 1% amplitude)
//! - A second-order Heun integrator producing a full trajectory
//! - Output collaborators: a `params.js` script for a browser renderer and
//!   a displacement/velocity plot (CLI only)
//!
//! ## Architecture
//!
//! - [`system`] - Validated physical parameters, initial state and timestep
//! - [`integrator`] - Decay duration, acceleration, Heun step and time loop
//! - [`session`] - Validates flat inputs, runs the integrator, packages results
//! - [`output`] - Export record, `params.js` writer and plot renderer
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! dampsim --m 1 --c 0.4 --k 4 --y0 1 --v0 0 --dt 0.01 --scale 100 --plot-file out/plot.png
//! ```
//!
//! ### Library
//!
//! ```
//! use dampsim::{run, SessionParameters};
//!
//! let result = run(&SessionParameters {
//!     m: 1.0, c: 0.4, k: 4.0, y0: 1.0, v0: 0.0, dt: 0.01, scale: 100.0,
//! }).unwrap();
//! assert_eq!(result.trajectory.len(), 2304);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmOscillator } from 'dampsim';
//!
//! const osc = new WasmOscillator(1, 0.4, 4, 1, 0, 0.01, 100);
//! const xs = osc.displacements();
//! ```
//!
//! ## Numerical Method
//!
//! For `m x'' + c x' + k x = 0` the run length is the time for the envelope
//! `exp(-ζ ω_n t)` to decay to 1%, and each step is one Heun
//! predictor-corrector update. Undamped systems have no finite decay time
//! and are rejected.

pub mod error;
pub mod integrator;
pub mod output;
pub mod session;
pub mod system;

// Re-export main types for convenience
pub use error::{DampError, Result};
pub use integrator::{
    derive_duration, simulate, DerivedQuantities, Sample, Simulator, SimulatorConfig, Trajectory,
};
pub use output::ExportRecord;
pub use session::{run, run_with_config, SessionParameters, SimulationResult};
pub use system::{InitialState, StepConfig, SystemParameters};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmOscillator;

/// Default output path for the renderer parameters.
pub const DEFAULT_PARAMS_FILE: &str = "params.js";

/// Default output path for the plot.
pub const DEFAULT_PLOT_FILE: &str = "plot.png";
