//! tr-project: parameter file format and validation.
//!
//! A parameter file is a flat YAML mapping from parameter names to numbers:
//!
//! ```yaml
//! I1: 1.0
//! I2: 2.0
//! kA: 10
//! # ...
//! th2dot: 0
//! ```

pub mod validate;

pub use validate::{ValidationError, numeric_map, validate_parameters};

use tr_core::ParameterSet;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse parameters from YAML text.
pub fn parse_yaml(content: &str) -> ProjectResult<ParameterSet> {
    let document: serde_yaml::Value = serde_yaml::from_str(content)?;
    let values = numeric_map(&document)?;
    Ok(validate_parameters(&values)?)
}

/// Read and parse a parameter file.
pub fn load_yaml(path: &std::path::Path) -> ProjectResult<ParameterSet> {
    let content = std::fs::read_to_string(path)?;
    let params = parse_yaml(&content)?;
    tracing::info!("Imported parameters from {}: {:?}", path.display(), params.to_map());
    Ok(params)
}
