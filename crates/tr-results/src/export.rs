//! CSV export of a trajectory.

use std::io::Write;
use std::path::Path;

use nalgebra::Vector4;
use tr_sim::Trajectory;
use tracing::info;

use crate::ResultsResult;

/// Column labels for `[theta1, theta2, theta1dot, theta2dot]`.
pub const DEFAULT_LABELS: [&str; 4] = ["theta1", "theta2", "theta1dot", "theta2dot"];

/// Header row: `Time` followed by one label per state component.
///
/// The caller's labels are used only when there is exactly one per component;
/// otherwise positional names `y0, y1, ...` are substituted.
pub fn header<S: AsRef<str>>(labels: &[S], width: usize) -> Vec<String> {
    let mut row = Vec::with_capacity(width + 1);
    row.push("Time".to_string());
    if labels.len() == width {
        row.extend(labels.iter().map(|l| l.as_ref().to_string()));
    } else {
        row.extend((0..width).map(|i| format!("y{i}")));
    }
    row
}

/// Write the trajectory as CSV, one row per recorded step.
pub fn write_csv<W: Write, S: AsRef<str>>(
    writer: W,
    trajectory: &Trajectory<Vector4<f64>>,
    labels: &[S],
) -> ResultsResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header(labels, 4))?;

    for (t, y) in trajectory.iter() {
        let mut row = Vec::with_capacity(5);
        row.push(t.to_string());
        row.extend(y.iter().map(|v| v.to_string()));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the trajectory to a CSV file.
pub fn export_csv<S: AsRef<str>>(
    path: &Path,
    trajectory: &Trajectory<Vector4<f64>>,
    labels: &[S],
) -> ResultsResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), trajectory, labels)?;
    info!("Simulation results written to {}", path.display());
    Ok(())
}
