//! Physical description of a mass-spring-damper system.
//!
//! This module holds the validated input records for a simulation.
//! Every record is built through a checked constructor, so an instance
//! that exists is always admissible input for the integrator:
//!
//! - [`SystemParameters`]: mass, damping and stiffness
//! - [`InitialState`]: displacement and velocity at `t = 0`
//! - [`StepConfig`]: the fixed integration timestep

mod types;
mod validate;

pub use types::*;
pub(crate) use validate::{require_finite, require_positive};
