//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while building or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Parameter error: {0}")]
    Parameter(#[from] tr_core::TrError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Singular matrix: {what}")]
    SingularMatrix { what: &'static str },

    #[error("Division by zero: {what}")]
    DivideByZero { what: &'static str },

    #[error("Non-finite state at t = {t}")]
    NonFinite { t: f64 },
}

pub type SimResult<T> = Result<T, SimError>;
