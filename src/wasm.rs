//! WASM bindings for dampsim.
//!
//! Lets the browser-side renderer run a simulation directly instead of
//! loading a pre-generated `params.js`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmOscillator } from 'dampsim';
//!
//! await init();
//!
//! const osc = new WasmOscillator(1.0, 0.4, 4.0, 1.0, 0.0, 0.01, 100.0);
//! const t = osc.times();
//! const x = osc.displacements();
//! window.DAMP_PARAMS = JSON.parse(osc.params_json());
//! ```

use wasm_bindgen::prelude::*;

use crate::integrator::DECAY_FRACTION;
use crate::output::params_js;
use crate::session::{run, SessionParameters, SimulationResult};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A completed oscillator simulation, exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmOscillator {
    result: SimulationResult,
}

#[wasm_bindgen]
impl WasmOscillator {
    /// Run a simulation.
    ///
    /// # Returns
    /// A new `WasmOscillator`, or the error message if the parameters are
    /// rejected or the integration fails.
    #[wasm_bindgen(constructor)]
    pub fn new(
        m: f64,
        c: f64,
        k: f64,
        y0: f64,
        v0: f64,
        dt: f64,
        scale: f64,
    ) -> Result<WasmOscillator, JsValue> {
        let parameters = SessionParameters {
            m,
            c,
            k,
            y0,
            v0,
            dt,
            scale,
        };
        let result = run(&parameters).map_err(to_js)?;
        Ok(WasmOscillator { result })
    }

    /// Simulated duration to 1% amplitude (s).
    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.result.duration()
    }

    /// Number of samples.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.result.trajectory.len()
    }

    /// Sample times as a Float64Array.
    #[wasm_bindgen]
    pub fn times(&self) -> Vec<f64> {
        self.result.trajectory.times()
    }

    /// Displacements as a Float64Array.
    #[wasm_bindgen]
    pub fn displacements(&self) -> Vec<f64> {
        self.result.trajectory.displacements()
    }

    /// Velocities as a Float64Array.
    #[wasm_bindgen]
    pub fn velocities(&self) -> Vec<f64> {
        self.result.trajectory.velocities()
    }

    /// The export record as JSON.
    #[wasm_bindgen]
    pub fn params_json(&self) -> Result<String, JsValue> {
        params_js::to_json(&self.result.export_record()).map_err(to_js)
    }

    /// The full `params.js` script for the given global object.
    #[wasm_bindgen]
    pub fn params_script(&self, global: &str) -> Result<String, JsValue> {
        params_js::render_script(&self.result.export_record(), global).map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Fraction of the initial amplitude at which simulations end.
#[wasm_bindgen]
pub fn decay_fraction() -> f64 {
    DECAY_FRACTION
}
