//! Fixed-step time integration of a full trajectory.

use crate::error::{DampError, Result};
use crate::system::{InitialState, StepConfig, SystemParameters};

use super::duration::DerivedQuantities;
use super::heun;
use super::{DEFAULT_MAX_STEPS, DEFAULT_OVERFLOW_THRESHOLD};

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Largest number of steps a single run may take.
    pub max_steps: usize,
    /// Largest |x| or |v| accepted before the run is declared unstable.
    pub overflow_threshold: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            overflow_threshold: DEFAULT_OVERFLOW_THRESHOLD,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the magnitude above which state values count as overflow.
    pub fn with_overflow_threshold(mut self, overflow_threshold: f64) -> Self {
        self.overflow_threshold = overflow_threshold;
        self
    }
}

/// One point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time (s)
    pub t: f64,
    /// Displacement (m)
    pub x: f64,
    /// Velocity (m/s)
    pub v: f64,
}

/// Samples `0..=N` of a simulated response, with `t[i] = i * dt`.
///
/// Always holds at least the initial sample. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    dt: f64,
}

impl Trajectory {
    /// Number of samples (steps + 1).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a trajectory contains at least its initial sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of integration steps taken.
    pub fn steps(&self) -> usize {
        self.samples.len() - 1
    }

    /// Timestep the trajectory was integrated with.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The initial sample at `t = 0`.
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    /// The final sample at `t = steps * dt`.
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Time of the final sample.
    pub fn end_time(&self) -> f64 {
        self.last().t
    }

    /// Iterate over samples.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Time column.
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Displacement column.
    pub fn displacements(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    /// Velocity column.
    pub fn velocities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.v).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Fixed-step Heun integrator for a single oscillator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Number of steps needed to cover `duration`, `ceil(duration / dt)`.
    ///
    /// Fails fast if the count exceeds the configured cap, before
    /// anything is allocated.
    pub fn step_count(&self, duration: f64, step: &StepConfig) -> Result<usize> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(DampError::invalid_argument(
                "duration",
                format!("must be finite and non-negative, got {duration}"),
            ));
        }

        let steps = (duration / step.dt()).ceil();
        if !steps.is_finite() || steps > self.config.max_steps as f64 {
            return Err(DampError::StepLimitExceeded {
                steps,
                limit: self.config.max_steps,
            });
        }
        Ok(steps as usize)
    }

    /// Integrate from `initial` over at least `duration` seconds.
    ///
    /// Each sample depends on the previous one, so this is a strictly
    /// sequential fold over `step_count` Heun steps. The sample buffer is
    /// reserved up front; a cap too large for memory fails with
    /// [`DampError::AllocationFailed`] instead of aborting.
    pub fn simulate_for(
        &self,
        params: &SystemParameters,
        initial: &InitialState,
        step: &StepConfig,
        duration: f64,
    ) -> Result<Trajectory> {
        let steps = self.step_count(duration, step)?;
        let dt = step.dt();

        let len = steps
            .checked_add(1)
            .ok_or(DampError::StepLimitExceeded {
                steps: steps as f64,
                limit: self.config.max_steps,
            })?;
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|source| DampError::AllocationFailed { samples: len, source })?;
        let (mut x, mut v) = (initial.displacement(), initial.velocity());
        samples.push(Sample { t: 0.0, x, v });

        for i in 1..=steps {
            (x, v) = heun::step(params, x, v, dt);
            let t = i as f64 * dt;
            self.check_bounded(i, t, x, v)?;
            samples.push(Sample { t, x, v });
        }

        Ok(Trajectory { samples, dt })
    }

    /// Integrate until the response envelope has decayed to 1%.
    pub fn simulate(
        &self,
        params: &SystemParameters,
        initial: &InitialState,
        step: &StepConfig,
    ) -> Result<Trajectory> {
        let derived = DerivedQuantities::derive(params)?;
        self.simulate_for(params, initial, step, derived.duration)
    }

    fn check_bounded(&self, step: usize, time: f64, x: f64, v: f64) -> Result<()> {
        let limit = self.config.overflow_threshold;
        if x.is_finite() && v.is_finite() && x.abs() <= limit && v.abs() <= limit {
            return Ok(());
        }
        Err(DampError::NumericOverflow { step, time, x, v })
    }
}

/// Integrate with the default [`SimulatorConfig`] until the envelope decays to 1%.
pub fn simulate(
    params: &SystemParameters,
    initial: &InitialState,
    step: &StepConfig,
) -> Result<Trajectory> {
    Simulator::new().simulate(params, initial, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_system() -> (SystemParameters, InitialState) {
        (
            SystemParameters::new(1.0, 0.4, 4.0).unwrap(),
            InitialState::at_rest(1.0).unwrap(),
        )
    }

    /// Closed-form free response of an underdamped oscillator.
    fn exact(params: &SystemParameters, initial: &InitialState, t: f64) -> (f64, f64) {
        let d = DerivedQuantities::derive(params).unwrap();
        let wd = d.damped_frequency().unwrap();
        let sigma = d.decay_rate;
        let (x0, v0) = (initial.displacement(), initial.velocity());
        let b = (v0 + sigma * x0) / wd;
        let (s, c) = (wd * t).sin_cos();
        let e = (-sigma * t).exp();
        let x = e * (x0 * c + b * s);
        let v = e * (-sigma * (x0 * c + b * s) + wd * (-x0 * s + b * c));
        (x, v)
    }

    #[test]
    fn test_reference_scenario() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.01).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();

        assert_eq!(traj.len(), 2304);
        assert_eq!(traj.steps(), 2303);
        assert_eq!(traj.first(), &Sample { t: 0.0, x: 1.0, v: 0.0 });
        assert_relative_eq!(traj.end_time(), 23.03, epsilon = 1e-9);
        assert!(traj.last().x.abs() < 0.01);
    }

    #[test]
    fn test_time_grid_is_even() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.25).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();
        for (i, s) in traj.iter().enumerate() {
            assert_eq!(s.t, i as f64 * 0.25);
        }
    }

    #[test]
    fn test_matches_closed_form() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.001).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();
        for s in traj.iter().step_by(500) {
            let (x, v) = exact(&params, &initial, s.t);
            assert_abs_diff_eq!(s.x, x, epsilon = 2e-5);
            assert_abs_diff_eq!(s.v, v, epsilon = 2e-5);
        }
    }

    #[test]
    fn test_first_zero_crossing() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.01).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();
        let crossing = traj
            .samples()
            .windows(2)
            .find(|w| w[0].x > 0.0 && w[1].x <= 0.0)
            .map(|w| w[1].t)
            .unwrap();
        let quarter = DerivedQuantities::derive(&params)
            .unwrap()
            .quarter_period()
            .unwrap();
        // Damping shifts the crossing slightly past the quarter period.
        assert!(crossing >= quarter && crossing - quarter < 0.1, "crossing = {crossing}");
    }

    #[test]
    fn test_envelope_peaks_decay() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.01).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();

        let peaks: Vec<f64> = traj
            .samples()
            .windows(3)
            .filter(|w| w[1].x.abs() >= w[0].x.abs() && w[1].x.abs() > w[2].x.abs())
            .map(|w| w[1].x.abs())
            .collect();
        assert!(peaks.len() > 10);
        for pair in peaks.windows(2).skip(2) {
            assert!(pair[1] <= pair[0], "{} > {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_second_order_convergence() {
        let (params, initial) = reference_system();
        let final_x = |dt: f64| {
            let traj = Simulator::new()
                .simulate_for(&params, &initial, &StepConfig::new(dt).unwrap(), 5.0)
                .unwrap();
            assert_relative_eq!(traj.end_time(), 5.0, epsilon = 1e-9);
            traj.last().x
        };

        let reference = final_x(1e-4);
        let coarse = (final_x(0.1) - reference).abs();
        let fine = (final_x(0.05) - reference).abs();
        let ratio = coarse / fine;
        assert!((3.5..4.5).contains(&ratio), "ratio = {ratio}");
    }

    #[test]
    fn test_step_limit() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.01).unwrap();
        let sim = Simulator::with_config(SimulatorConfig::new().with_max_steps(1000));
        match sim.simulate(&params, &initial, &step) {
            Err(DampError::StepLimitExceeded { steps, limit }) => {
                assert_eq!(steps, 2303.0);
                assert_eq!(limit, 1000);
            }
            other => panic!("expected StepLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_unreservable_trajectory_is_an_error() {
        // 1e18 samples pass an unbounded cap but cannot be allocated.
        let (params, initial) = reference_system();
        let step = StepConfig::new(1e-18).unwrap();
        let sim = Simulator::with_config(SimulatorConfig::new().with_max_steps(usize::MAX));
        match sim.simulate_for(&params, &initial, &step, 1.0) {
            Err(DampError::AllocationFailed { samples, .. }) => assert!(samples > 1 << 59),
            other => panic!("expected AllocationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_pathological_duration_fails_fast() {
        let params = SystemParameters::new(1.0, 1e-300, 1.0).unwrap();
        let initial = InitialState::at_rest(1.0).unwrap();
        let step = StepConfig::new(1e-3).unwrap();
        assert!(matches!(
            simulate(&params, &initial, &step),
            Err(DampError::StepLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_unstable_timestep_overflows() {
        // ω_n = 1000 with dt = 0.1 is far outside Heun's stability region.
        let params = SystemParameters::new(1.0, 1.0, 1e6).unwrap();
        let initial = InitialState::at_rest(1.0).unwrap();
        let step = StepConfig::new(0.1).unwrap();
        match simulate(&params, &initial, &step) {
            Err(DampError::NumericOverflow { step, x, v, .. }) => {
                assert!(step > 0);
                assert!(x.abs() > 1e150 || v.abs() > 1e150 || !x.is_finite() || !v.is_finite());
            }
            other => panic!("expected NumericOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_duration_yields_initial_sample_only() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.1).unwrap();
        let traj = Simulator::new()
            .simulate_for(&params, &initial, &step, 0.0)
            .unwrap();
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.steps(), 0);
        assert!(!traj.is_empty());
    }

    #[test]
    fn test_columns() {
        let (params, initial) = reference_system();
        let step = StepConfig::new(0.5).unwrap();
        let traj = simulate(&params, &initial, &step).unwrap();
        assert_eq!(traj.times().len(), traj.len());
        assert_eq!(traj.displacements()[0], 1.0);
        assert_eq!(traj.velocities()[0], 0.0);
        assert_eq!(traj.dt(), 0.5);
    }
}
