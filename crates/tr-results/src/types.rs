//! Run manifest: what was run, how, and with which step.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tr_sim::{ModalAnalysis, SimConfig, Simulation};

use crate::ResultsResult;
use crate::hash::compute_run_id;

pub type RunId = String;

/// Engine version folded into every run ID.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub timestamp: String,
    pub engine_version: String,
    pub parameters: BTreeMap<String, f64>,
    pub config: SimConfig,
    /// Step used for the run (s)
    pub dt: f64,
    /// Number of recorded trajectory entries
    pub steps: usize,
    /// Time of the last recorded entry (s), absent for an empty trajectory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_final: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalAnalysis>,
}

impl RunManifest {
    /// Describe a completed simulation.
    pub fn from_simulation(sim: &Simulation, config: &SimConfig) -> Self {
        let params = sim.model.params();
        Self {
            run_id: compute_run_id(params, config, ENGINE_VERSION),
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: ENGINE_VERSION.to_string(),
            parameters: params.to_map(),
            config: *config,
            dt: sim.dt,
            steps: sim.trajectory.len(),
            t_final: sim.trajectory.last().map(|(t, _)| t),
            modal: sim.modal.clone(),
        }
    }

    pub fn save(&self, path: &Path) -> ResultsResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> ResultsResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
