//! dampsim - damped oscillator simulator
//!
//! Solves the damped oscillator ODE and emits `params.js` plus a plot.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info dampsim --m 1 --c 0.4 --k 4 --y0 1 --v0 0 --dt 0.01 --scale 100
//! ```

use std::path::PathBuf;

use clap::Parser;
use dampsim::{
    error::Result,
    integrator::DEFAULT_MAX_STEPS,
    output::{render_plot, write_params_js, DEFAULT_GLOBAL},
    run_with_config, SessionParameters, SimulatorConfig, DEFAULT_PARAMS_FILE, DEFAULT_PLOT_FILE,
};

/// Solve damped oscillator ODE and emit params.js plus plot.png.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mass (kg)
    #[arg(long, allow_negative_numbers = true)]
    m: f64,

    /// Damping coefficient (N*s/m)
    #[arg(long, allow_negative_numbers = true)]
    c: f64,

    /// Stiffness (N/m)
    #[arg(long, allow_negative_numbers = true)]
    k: f64,

    /// Initial displacement (m)
    #[arg(long, allow_negative_numbers = true)]
    y0: f64,

    /// Initial velocity (m/s)
    #[arg(long, allow_negative_numbers = true)]
    v0: f64,

    /// Integration timestep (s)
    #[arg(long, allow_negative_numbers = true)]
    dt: f64,

    /// Render scale factor
    #[arg(long, allow_negative_numbers = true)]
    scale: f64,

    /// Output filename for the generated plot (.svg for vector output)
    #[arg(long, default_value = DEFAULT_PLOT_FILE)]
    plot_file: PathBuf,

    /// Output filename for the renderer parameters
    #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
    params_file: PathBuf,

    /// Global object the parameters are assigned to
    #[arg(long, default_value = DEFAULT_GLOBAL)]
    global: String,

    /// Maximum number of integration steps
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let parameters = SessionParameters {
        m: args.m,
        c: args.c,
        k: args.k,
        y0: args.y0,
        v0: args.v0,
        dt: args.dt,
        scale: args.scale,
    };
    let config = SimulatorConfig::new().with_max_steps(args.max_steps);

    // Integrate
    let result = run_with_config(&parameters, config)?;
    log::debug!(
        "omega_n = {:.6} rad/s, zeta = {:.6} ({}), duration = {:.6} s, {} samples",
        result.derived.natural_frequency,
        result.derived.damping_ratio,
        result.derived.regime(),
        result.duration(),
        result.trajectory.len()
    );

    // Emit artifacts
    write_params_js(&result.export_record(), &args.global, &args.params_file)?;
    render_plot(&result.trajectory, &args.plot_file)?;

    println!(
        "Wrote {} and {}",
        args.params_file.display(),
        args.plot_file.display()
    );
    Ok(())
}
