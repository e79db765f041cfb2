//! Session driver: validate inputs, run the integrator, package results.
//!
//! [`run`] is the single entry point used by the CLI and WASM front ends.
//! The [`SimulationResult`] it returns is everything the output
//! collaborators need; it carries no formatting or file-path knowledge.

use crate::error::{DampError, Result};
use crate::integrator::{DerivedQuantities, Simulator, SimulatorConfig, Trajectory};
use crate::output::ExportRecord;
use crate::system::{require_finite, InitialState, StepConfig, SystemParameters};

/// Flat, unvalidated simulation inputs as they arrive from a front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionParameters {
    /// Mass (kg)
    pub m: f64,
    /// Damping coefficient (N·s/m)
    pub c: f64,
    /// Stiffness (N/m)
    pub k: f64,
    /// Initial displacement (m)
    pub y0: f64,
    /// Initial velocity (m/s)
    pub v0: f64,
    /// Integration timestep (s)
    pub dt: f64,
    /// Render scale for the browser-side consumer; not used by the integrator
    pub scale: f64,
}

/// Everything produced by one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// The integrated response
    pub trajectory: Trajectory,
    /// Echoed physical parameters
    pub parameters: SystemParameters,
    /// Echoed initial state
    pub initial: InitialState,
    /// Echoed step configuration
    pub step: StepConfig,
    /// ω_n, ζ and the decay duration
    pub derived: DerivedQuantities,
    /// Echoed render scale
    pub scale: f64,
}

impl SimulationResult {
    /// Simulated duration to 1% amplitude (s).
    pub fn duration(&self) -> f64 {
        self.derived.duration
    }

    /// Flat record handed to the params.js writer.
    pub fn export_record(&self) -> ExportRecord {
        ExportRecord {
            m: self.parameters.mass(),
            c: self.parameters.damping(),
            k: self.parameters.stiffness(),
            y0: self.initial.displacement(),
            v0: self.initial.velocity(),
            dt: self.step.dt(),
            scale: self.scale,
            duration: self.derived.duration,
        }
    }
}

/// Run a simulation with the default [`SimulatorConfig`].
pub fn run(parameters: &SessionParameters) -> Result<SimulationResult> {
    run_with_config(parameters, SimulatorConfig::default())
}

/// Run a simulation with a custom [`SimulatorConfig`].
///
/// Argument errors are reported before domain errors, and both before
/// any integration work starts.
pub fn run_with_config(
    parameters: &SessionParameters,
    config: SimulatorConfig,
) -> Result<SimulationResult> {
    let step = StepConfig::new(parameters.dt)?;
    let system = SystemParameters::new(parameters.m, parameters.c, parameters.k)?;
    let initial = InitialState::new(parameters.y0, parameters.v0)?;
    let scale = require_finite("scale", parameters.scale)?;

    if system.damping() == 0.0 {
        return Err(DampError::domain(
            "undamped system (c = 0) never decays; a positive damping coefficient is required",
        ));
    }

    let derived = DerivedQuantities::derive(&system)?;
    let trajectory =
        Simulator::with_config(config).simulate_for(&system, &initial, &step, derived.duration)?;

    Ok(SimulationResult {
        trajectory,
        parameters: system,
        initial,
        step,
        derived,
        scale,
    })
}
