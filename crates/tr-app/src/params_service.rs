//! Parameter loading and inspection.

use std::path::Path;

use tr_core::ParameterSet;
use tr_sim::{ModalAnalysis, SimError};

use crate::error::{AppError, AppResult};

/// Read a parameter file.
pub fn load_parameters(path: &Path) -> AppResult<ParameterSet> {
    tr_project::load_yaml(path).map_err(|e| AppError::from_project(e, path))
}

/// Read a parameter file and, when requested, check physical admissibility.
pub fn validate_parameters(path: &Path, check_admissibility: bool) -> AppResult<ParameterSet> {
    let params = load_parameters(path)?;
    if check_admissibility {
        params
            .check_admissible()
            .map_err(|e| AppError::from(SimError::from(e)))?;
    }
    Ok(params)
}

/// Natural frequencies and the step the modal policy would select.
pub fn modal_report(path: &Path, check_admissibility: bool) -> AppResult<ModalAnalysis> {
    let params = validate_parameters(path, check_admissibility)?;
    Ok(tr_sim::analyze(&params)?)
}
