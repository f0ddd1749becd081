use thiserror::Error;

pub type TrResult<T> = Result<T, TrError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrError {
    #[error("Missing parameter: {key}")]
    MissingParameter { key: &'static str },

    #[error("Non-finite value for parameter {key}: {value}")]
    NonFinite { key: &'static str, value: f64 },

    #[error("Parameter {key} = {value} is out of range ({reason})")]
    OutOfDomain {
        key: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
