//! Core types for describing an oscillator.

use std::fmt;

use crate::error::{DampError, Result};

use super::{require_finite, require_positive};

/// Mass, damping and stiffness of a linear oscillator.
///
/// The equation of motion is `m x'' + c x' + k x = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemParameters {
    mass: f64,
    damping: f64,
    stiffness: f64,
}

impl SystemParameters {
    /// Create validated system parameters.
    ///
    /// # Arguments
    /// * `mass` - Mass in kg, must be positive
    /// * `damping` - Damping coefficient in N·s/m, must be non-negative
    /// * `stiffness` - Spring stiffness in N/m, must be positive
    ///
    /// Negative damping is reported as a domain error: the system is
    /// physically well formed but pumps energy in and never decays.
    pub fn new(mass: f64, damping: f64, stiffness: f64) -> Result<Self> {
        let mass = require_positive("m", mass)?;
        let stiffness = require_positive("k", stiffness)?;
        let damping = require_finite("c", damping)?;
        if damping < 0.0 {
            return Err(DampError::domain(format!(
                "negative damping c = {damping} makes the response grow without bound"
            )));
        }
        Ok(Self {
            mass,
            damping,
            stiffness,
        })
    }

    /// Build parameters without validation, for exercising degenerate
    /// systems (zero stiffness) in tests.
    #[cfg(test)]
    pub(crate) fn from_raw(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self {
            mass,
            damping,
            stiffness,
        }
    }

    /// Mass (kg).
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Damping coefficient (N·s/m).
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Stiffness (N/m).
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping per unit mass, `c/m` (1/s).
    pub fn damping_per_mass(&self) -> f64 {
        self.damping / self.mass
    }

    /// Stiffness per unit mass, `k/m` (1/s²).
    pub fn stiffness_per_mass(&self) -> f64 {
        self.stiffness / self.mass
    }
}

impl fmt::Display for SystemParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m = {} kg, c = {} N·s/m, k = {} N/m",
            self.mass, self.damping, self.stiffness
        )
    }
}

/// Displacement and velocity at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    displacement: f64,
    velocity: f64,
}

impl InitialState {
    /// Create a validated initial state. Both values must be finite.
    pub fn new(displacement: f64, velocity: f64) -> Result<Self> {
        Ok(Self {
            displacement: require_finite("y0", displacement)?,
            velocity: require_finite("v0", velocity)?,
        })
    }

    /// A system released from rest at `displacement`.
    pub fn at_rest(displacement: f64) -> Result<Self> {
        Self::new(displacement, 0.0)
    }

    /// Initial displacement (m).
    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    /// Initial velocity (m/s).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

/// Fixed integration timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfig {
    dt: f64,
}

impl StepConfig {
    /// Create a step configuration. `dt` must be finite and positive.
    pub fn new(dt: f64) -> Result<Self> {
        Ok(Self {
            dt: require_positive("dt", dt)?,
        })
    }

    /// Timestep (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }
}
