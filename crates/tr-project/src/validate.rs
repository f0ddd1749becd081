//! Parameter document validation.

use std::collections::BTreeMap;

use serde_yaml::Value;
use tr_core::{PARAMETER_KEYS, ParameterSet, TrError};
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Parameter document must be a mapping of names to numbers, found {found}")]
    NotAMapping { found: &'static str },

    #[error("Parameter names must be strings, found {found}")]
    InvalidKey { found: &'static str },

    #[error("Invalid value: {key} = {found} (expected an integer or float)")]
    NonNumeric { key: String, found: String },

    #[error(transparent)]
    Parameter(#[from] TrError),
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Convert a YAML document into a name→number map.
///
/// Every value must be an integer or float; anything else is rejected with the
/// offending key.
pub fn numeric_map(document: &Value) -> Result<BTreeMap<String, f64>, ValidationError> {
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(ValidationError::NotAMapping {
                found: kind_of(other),
            });
        }
    };

    let mut values = BTreeMap::new();
    for (key, value) in mapping {
        let key = key.as_str().ok_or(ValidationError::InvalidKey {
            found: kind_of(key),
        })?;
        let number = value.as_f64().ok_or_else(|| ValidationError::NonNumeric {
            key: key.to_string(),
            found: match value {
                Value::String(s) => format!("{s:?}"),
                other => kind_of(other).to_string(),
            },
        })?;
        values.insert(key.to_string(), number);
    }
    Ok(values)
}

/// Build a [`ParameterSet`] from a numeric map, warning about unknown keys.
pub fn validate_parameters(values: &BTreeMap<String, f64>) -> Result<ParameterSet, ValidationError> {
    for key in values.keys() {
        if !PARAMETER_KEYS.contains(&key.as_str()) {
            warn!("Ignoring unknown parameter {key}");
        }
    }
    Ok(ParameterSet::from_map(values)?)
}
