//! Time-series chart of a simulated trajectory.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{DampError, Result};
use crate::integrator::Trajectory;

use super::ensure_parent_dir;

/// Canvas width in pixels (9 in at 150 dpi).
pub const PLOT_WIDTH: u32 = 1350;

/// Canvas height in pixels (5 in at 150 dpi).
pub const PLOT_HEIGHT: u32 = 750;

const TITLE: &str = "Damped Oscillator Response";
const DISPLACEMENT_COLOR: RGBColor = RGBColor(31, 119, 180);
const VELOCITY_COLOR: RGBColor = RGBColor(255, 127, 14);

fn plot_err<E: std::fmt::Display>(e: E) -> DampError {
    DampError::plot(e.to_string())
}

/// Render displacement and velocity against time.
///
/// A path ending in `.svg` produces an SVG with title, axis labels and a
/// legend. Anything else is encoded as a bitmap (PNG for `.png`) holding the
/// grid and both curves only: plotters is built without a font rasterizer,
/// and its bitmap backend cannot draw glyphs.
pub fn render_plot(trajectory: &Trajectory, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        draw(&root, trajectory, Labels::Text)?;
    } else {
        let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        draw(&root, trajectory, Labels::Hidden)?;
    }

    log::info!("wrote {}", path.display());
    Ok(())
}

/// Axis ranges covering both series, padded by 5%.
fn value_range(trajectory: &Trajectory) -> (f64, f64) {
    let (lo, hi) = trajectory
        .iter()
        .flat_map(|s| [s.x, s.v])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Whether the backend can render text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Labels {
    Text,
    Hidden,
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    trajectory: &Trajectory,
    labels: Labels,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;

    let t_end = if trajectory.end_time() > 0.0 {
        trajectory.end_time()
    } else {
        1.0
    };
    let (y_lo, y_hi) = value_range(trajectory);

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if labels == Labels::Text {
        builder
            .caption(TITLE, ("sans-serif", 32))
            .x_label_area_size(50)
            .y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d(0.0..t_end, y_lo..y_hi)
        .map_err(plot_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2));
    match labels {
        Labels::Text => mesh.x_desc("Time [s]"),
        Labels::Hidden => mesh.disable_axes(),
    };
    mesh.draw().map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            trajectory.iter().map(|s| (s.t, s.x)),
            DISPLACEMENT_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("x(t) displacement [m]")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DISPLACEMENT_COLOR));

    chart
        .draw_series(LineSeries::new(
            trajectory.iter().map(|s| (s.t, s.v)),
            VELOCITY_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("v(t) velocity [m/s]")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], VELOCITY_COLOR));

    if labels == Labels::Text {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}
