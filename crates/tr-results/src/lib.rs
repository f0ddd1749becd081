//! tr-results: trajectory export and run manifests.

pub mod export;
pub mod hash;
pub mod plot;
pub mod types;

pub use export::{DEFAULT_LABELS, export_csv, header, write_csv};
pub use hash::compute_run_id;
pub use plot::{PLOT_FILES, export_plots, plot_dof};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Plot error: {0}")]
    Plot(String),
}
