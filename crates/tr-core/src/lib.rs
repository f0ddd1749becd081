//! tr-core: shared foundation for the two-rotor simulator.
//!
//! Contains:
//! - params (the validated `ParameterSet` every other crate reads)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod params;

pub use error::{TrError, TrResult};
pub use numeric::*;
pub use params::{PARAMETER_KEYS, ParameterSet};
