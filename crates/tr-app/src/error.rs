//! Error types for the tr-app service layer.

use std::path::PathBuf;

use tr_project::ProjectError;
use tr_results::ResultsError;
use tr_sim::SimError;

use crate::progress::RunStage;

/// Application error: what went wrong and the stage it happened in.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{stage} failed: {message}")]
    Parameter { stage: RunStage, message: String },

    #[error("{stage} failed: {message}")]
    SingularMatrix { stage: RunStage, message: String },

    #[error("{stage} failed: {message}")]
    DivideByZero { stage: RunStage, message: String },

    #[error("{stage} failed: {message}")]
    Simulation { stage: RunStage, message: String },

    #[error("{stage} failed: I/O error on {}: {source}", path.display())]
    Io {
        stage: RunStage,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} failed: {message}")]
    Results { stage: RunStage, message: String },
}

/// Result type for tr-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn stage(&self) -> RunStage {
        match self {
            AppError::Parameter { stage, .. }
            | AppError::SingularMatrix { stage, .. }
            | AppError::DivideByZero { stage, .. }
            | AppError::Simulation { stage, .. }
            | AppError::Io { stage, .. }
            | AppError::Results { stage, .. } => *stage,
        }
    }

    /// Tag a parameter-loading failure with the file it concerned.
    pub(crate) fn from_project(err: ProjectError, path: &std::path::Path) -> Self {
        let stage = RunStage::LoadingParameters;
        match err {
            ProjectError::Io(source) => AppError::Io {
                stage,
                path: path.to_path_buf(),
                source,
            },
            other => AppError::Parameter {
                stage,
                message: format!("{}: {}", path.display(), other),
            },
        }
    }

    /// Tag an export failure with the file being written.
    pub(crate) fn from_results(err: ResultsError, path: &std::path::Path) -> Self {
        let stage = RunStage::Exporting;
        match err {
            ResultsError::Io(source) => AppError::Io {
                stage,
                path: path.to_path_buf(),
                source,
            },
            other => AppError::Results {
                stage,
                message: format!("{}: {}", path.display(), other),
            },
        }
    }
}

// Each simulation failure maps to the stage that raises it.
impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        let message = err.to_string();
        match err {
            SimError::Parameter(_) => AppError::Parameter {
                stage: RunStage::LoadingParameters,
                message,
            },
            SimError::SingularMatrix { .. } => AppError::SingularMatrix {
                stage: RunStage::AssemblingModel,
                message,
            },
            SimError::DivideByZero { .. } => AppError::DivideByZero {
                stage: RunStage::SelectingStep,
                message,
            },
            SimError::InvalidArg { .. } => AppError::Simulation {
                stage: RunStage::SelectingStep,
                message,
            },
            SimError::NonFinite { .. } => AppError::Simulation {
                stage: RunStage::Integrating,
                message,
            },
        }
    }
}
