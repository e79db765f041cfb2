//! Heun's method (explicit trapezoidal predictor-corrector).

use crate::system::SystemParameters;

/// Acceleration of the oscillator at state `(x, v)`.
///
/// From the state-space form `x' = v`, `v' = -(c/m) v - (k/m) x`.
#[inline]
pub fn accel(params: &SystemParameters, x: f64, v: f64) -> f64 {
    -params.damping_per_mass() * v - params.stiffness_per_mass() * x
}

/// Advance `(x, v)` by one timestep `dt`.
///
/// ```text
/// a1  = accel(x, v)
/// x_p = x + dt v          v_p = v + dt a1       (Euler predictor)
/// a2  = accel(x_p, v_p)
/// x'  = x + dt/2 (v + v_p)
/// v'  = v + dt/2 (a1 + a2)                      (trapezoidal corrector)
/// ```
///
/// Local truncation error is O(dt³), global error O(dt²).
pub fn step(params: &SystemParameters, x: f64, v: f64, dt: f64) -> (f64, f64) {
    let a1 = accel(params, x, v);

    let x_predict = x + dt * v;
    let v_predict = v + dt * a1;

    let a2 = accel(params, x_predict, v_predict);

    let x_next = x + dt * 0.5 * (v + v_predict);
    let v_next = v + dt * 0.5 * (a1 + a2);
    (x_next, v_next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accel() {
        let params = SystemParameters::new(2.0, 0.4, 8.0).unwrap();
        // -(0.2)(1.5) - (4)(0.5)
        assert_relative_eq!(accel(&params, 0.5, 1.5), -2.3, epsilon = 1e-12);
        assert_eq!(accel(&params, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_step_free_drift_is_exact() {
        let params = SystemParameters::from_raw(1.0, 0.0, 0.0);
        let (x0, v0, dt) = (0.25, -1.5, 0.1);

        let (mut x, mut v) = (x0, v0);
        for i in 1..=10 {
            (x, v) = step(&params, x, v, dt);
            let t = i as f64 * dt;
            assert_eq!(v, v0);
            assert_relative_eq!(x, x0 + v0 * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_step_matches_hand_computation() {
        let params = SystemParameters::new(1.0, 0.4, 4.0).unwrap();
        let dt = 0.1;
        let (x, v) = step(&params, 1.0, 0.0, dt);

        // a1 = -4, predictor (1.0, -0.4), a2 = 0.16 - 4 = -3.84
        assert_relative_eq!(x, 1.0 + 0.05 * (0.0 - 0.4), epsilon = 1e-12);
        assert_relative_eq!(v, 0.05 * (-4.0 - 3.84), epsilon = 1e-12);
    }

    #[test]
    fn test_step_at_equilibrium_stays_put() {
        let params = SystemParameters::new(3.0, 1.0, 7.0).unwrap();
        assert_eq!(step(&params, 0.0, 0.0, 0.05), (0.0, 0.0));
    }

    #[test]
    fn test_local_error_is_third_order() {
        // Undamped unit oscillator released from x = 1: exact v(t) = -sin t.
        let params = SystemParameters::new(1.0, 0.0, 1.0).unwrap();
        let local_error = |dt: f64| {
            let (_, v) = step(&params, 1.0, 0.0, dt);
            (v + dt.sin()).abs()
        };
        let ratio = local_error(0.02) / local_error(0.01);
        assert!((ratio - 8.0).abs() < 0.5, "ratio = {ratio}");
    }
}
