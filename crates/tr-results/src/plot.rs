//! PNG charts of a trajectory, one per rotor.
//!
//! Each chart overlays the angular position and angular velocity of one
//! degree of freedom against time.

use std::ops::Range;
use std::path::{Path, PathBuf};

use nalgebra::Vector4;
use plotters::prelude::*;
use tr_sim::Trajectory;
use tracing::info;

use crate::{ResultsError, ResultsResult};

/// Chart size in pixels.
pub const PLOT_SIZE: (u32, u32) = (800, 600);

/// File names of the rotor 1 and rotor 2 charts.
pub const PLOT_FILES: [&str; 2] = ["simulation_plot_1.png", "simulation_plot_2.png"];

const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(30, 90, 200),
    RGBColor(200, 60, 40),
    RGBColor(40, 150, 70),
    RGBColor(150, 60, 170),
];

fn plot_err(err: impl std::fmt::Display) -> ResultsError {
    ResultsError::Plot(err.to_string())
}

/// Padded `[min, max]` of the values; `-1..1` when there are none.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return -1.0..1.0;
    }
    let pad = 0.05 * (hi - lo).max(1e-9);
    (lo - pad)..(hi + pad)
}

fn time_range(trajectory: &Trajectory<Vector4<f64>>) -> Range<f64> {
    match (trajectory.t.first(), trajectory.t.last()) {
        (Some(&first), Some(&last)) if last > first => first..last,
        (Some(&first), Some(_)) => first..first + 1.0,
        _ => 0.0..1.0,
    }
}

/// Draw position and velocity of rotor `dof` (0 or 1) into a PNG file.
pub fn plot_dof(
    path: &Path,
    trajectory: &Trajectory<Vector4<f64>>,
    dof: usize,
) -> ResultsResult<()> {
    if dof > 1 {
        return Err(ResultsError::Plot(format!(
            "no rotor {} to plot (expected 1 or 2)",
            dof + 1
        )));
    }
    let (pos, vel) = (dof, dof + 2);

    let y_range = padded_range(trajectory.x.iter().flat_map(|y| [y[pos], y[vel]]));

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .caption("Simulation Results", ("sans-serif", 28))
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(time_range(trajectory), y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Position/velocity (units)")
        .draw()
        .map_err(plot_err)?;

    let series = [
        (pos, format!("Position DOF {}", dof + 1), SERIES_COLORS[2 * dof]),
        (vel, format!("Velocity DOF {}", dof + 1), SERIES_COLORS[2 * dof + 1]),
    ];
    for (column, label, color) in series {
        chart
            .draw_series(LineSeries::new(
                trajectory.iter().map(|(t, y)| (t, y[column])),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!("Plot saved to {}", path.display());
    Ok(())
}

/// Write both rotor charts into `dir`, returning their paths.
pub fn export_plots(
    dir: &Path,
    trajectory: &Trajectory<Vector4<f64>>,
) -> ResultsResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(PLOT_FILES.len());
    for (dof, name) in PLOT_FILES.iter().enumerate() {
        let path = dir.join(name);
        plot_dof(&path, trajectory, dof)?;
        paths.push(path);
    }
    Ok(paths)
}
