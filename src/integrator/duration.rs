//! Natural frequency, damping ratio and decay duration.

use std::fmt;

use crate::error::{DampError, Result};
use crate::system::SystemParameters;

use super::{CRITICAL_DAMPING_TOLERANCE, DECAY_FRACTION};

/// Qualitative character of the free response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DampingRegime {
    /// ζ < 1: oscillatory decay
    Underdamped,
    /// ζ = 1: fastest non-oscillatory return
    CriticallyDamped,
    /// ζ > 1: slow non-oscillatory return
    Overdamped,
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DampingRegime::Underdamped => "underdamped",
            DampingRegime::CriticallyDamped => "critically damped",
            DampingRegime::Overdamped => "overdamped",
        };
        f.write_str(name)
    }
}

/// Quantities derived in closed form from [`SystemParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    /// ω_n = sqrt(k/m) (rad/s)
    pub natural_frequency: f64,
    /// ζ = c / (2 sqrt(m k))
    pub damping_ratio: f64,
    /// ζ ω_n (1/s), the exponent of the amplitude envelope
    pub decay_rate: f64,
    /// Time for the envelope exp(-ζ ω_n t) to fall to [`DECAY_FRACTION`] (s)
    pub duration: f64,
}

impl DerivedQuantities {
    /// Derive ω_n, ζ and the decay duration.
    ///
    /// Fails with [`DampError::DomainError`] when ζ ω_n is not positive
    /// (`c = 0`, or `c / m` underflowing to zero) or the duration overflows.
    ///
    /// ζ ω_n is evaluated as `c / 2m` and ζ through separate square roots so
    /// that neither `m * k` nor the ratios overflow for extreme magnitudes.
    pub fn derive(params: &SystemParameters) -> Result<Self> {
        let m = params.mass();
        let c = params.damping();
        let k = params.stiffness();

        let natural_frequency = (k / m).sqrt();
        let damping_ratio = c / (2.0 * m.sqrt() * k.sqrt());
        let decay_rate = 0.5 * (c / m);

        if decay_rate.is_nan() || decay_rate <= 0.0 {
            return Err(DampError::domain(format!(
                "zeta * omega_n = {decay_rate:e} (c = {c:e}, m = {m:e}) is not positive; \
                 the envelope never decays to {}% of its initial amplitude",
                DECAY_FRACTION * 100.0
            )));
        }

        let duration = -DECAY_FRACTION.ln() / decay_rate;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DampError::domain(format!(
                "decay duration is not a finite positive time (zeta * omega_n = {decay_rate:e})"
            )));
        }

        Ok(Self {
            natural_frequency,
            damping_ratio,
            decay_rate,
            duration,
        })
    }

    /// Classify the response by damping ratio.
    pub fn regime(&self) -> DampingRegime {
        if (self.damping_ratio - 1.0).abs() <= CRITICAL_DAMPING_TOLERANCE {
            DampingRegime::CriticallyDamped
        } else if self.damping_ratio < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }

    /// Damped angular frequency ω_d = ω_n sqrt(1 - ζ²), for underdamped systems only.
    pub fn damped_frequency(&self) -> Option<f64> {
        match self.regime() {
            DampingRegime::Underdamped => {
                Some(self.natural_frequency * (1.0 - self.damping_ratio.powi(2)).sqrt())
            }
            _ => None,
        }
    }

    /// Quarter of the damped period, `π / (2 ω_d)`.
    ///
    /// Close to the first zero crossing of a lightly damped system released from rest.
    pub fn quarter_period(&self) -> Option<f64> {
        self.damped_frequency()
            .map(|omega_d| std::f64::consts::PI / (2.0 * omega_d))
    }
}

/// Time for a system with these raw parameters to decay to 1% amplitude.
///
/// Validates the parameters first, so `m <= 0` or `k <= 0` yield
/// [`DampError::InvalidArgument`] and `c <= 0` yields [`DampError::DomainError`].
pub fn derive_duration(mass: f64, damping: f64, stiffness: f64) -> Result<f64> {
    let params = SystemParameters::new(mass, damping, stiffness)?;
    DerivedQuantities::derive(&params).map(|d| d.duration)
}
