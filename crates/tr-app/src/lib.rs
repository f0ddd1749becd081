//! Shared application service layer for the two-rotor simulator.
//!
//! Sequences the stages of a run (load parameters, assemble, select step,
//! integrate, export) for the CLI, reporting progress and tagging failures
//! with the stage they occurred in.

pub mod error;
pub mod params_service;
pub mod progress;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use params_service::{load_parameters, modal_report, validate_parameters};
pub use progress::{IntegrationProgress, RunProgressEvent, RunStage};
pub use run_service::{RunRequest, RunResponse, RunTimingSummary, run, run_with_progress};
