//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};
use tr_core::ParameterSet;
use tr_sim::SimConfig;

/// Run ID derived from the inputs that determine a trajectory.
///
/// Identical parameters, configuration and engine version always hash to
/// the same ID.
pub fn compute_run_id(params: &ParameterSet, config: &SimConfig, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let params_json = serde_json::to_string(&params.to_map()).unwrap_or_default();
    hasher.update(params_json.as_bytes());

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
