//! End-to-end run of the two-rotor model from a parameter set.

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};
use tr_core::ParameterSet;
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::forcing::ForcingKind;
use crate::integrator::IntegratorType;
use crate::modal::{ModalAnalysis, StepPolicy};
use crate::rotor::RotorModel;
use crate::sim::{SimOptions, SimProgress, Trajectory, run_sim_with_progress};

/// Configuration selecting the variant of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub forcing: ForcingKind,
    pub step: StepPolicy,
    pub integrator: IntegratorType,
    /// Reject physically inadmissible parameters before assembly.
    pub check_admissibility: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            forcing: ForcingKind::default(),
            step: StepPolicy::default(),
            integrator: IntegratorType::default(),
            check_admissibility: true,
        }
    }
}

/// Completed run: the model, the step it used and the recorded trajectory.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub model: RotorModel,
    pub dt: f64,
    pub modal: Option<ModalAnalysis>,
    pub trajectory: Trajectory<Vector4<f64>>,
}

/// Validate, assemble, choose the step and integrate over `[0, tmax]`.
pub fn simulate(params: &ParameterSet, config: &SimConfig) -> SimResult<Simulation> {
    simulate_with_progress(params, config, None)
}

pub fn simulate_with_progress(
    params: &ParameterSet,
    config: &SimConfig,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<Simulation> {
    if config.check_admissibility {
        params.check_admissible()?;
    }

    let model = RotorModel::assemble(params, config.forcing)?;
    let (dt, modal) = config.step.resolve(params)?;
    integrate(model, dt, modal, config.integrator, progress)
}

/// Integrate an assembled model over `[0, tmax]` with a resolved step.
///
/// # Errors
/// - [`SimError::InvalidArg`] if `dt` is invalid or the step count is unbounded
/// - [`SimError::NonFinite`] at the first recorded time whose state is NaN or infinite
pub fn integrate(
    model: RotorModel,
    dt: f64,
    modal: Option<ModalAnalysis>,
    integrator: IntegratorType,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<Simulation> {
    let params = model.params();
    let opts = SimOptions {
        dt,
        t_end: params.tmax,
        integrator,
    };
    let steps = opts.step_count()?;
    info!(
        "Initial conditions: {:?}, {} steps of {:?}",
        params.initial_state(),
        steps,
        integrator
    );

    let trajectory = run_sim_with_progress(&model, &opts, progress)?;

    if let Some(t) = first_non_finite(&trajectory) {
        return Err(SimError::NonFinite { t });
    }

    Ok(Simulation {
        model,
        dt,
        modal,
        trajectory,
    })
}

/// Time of the first recorded state with a NaN or infinite component.
fn first_non_finite(trajectory: &Trajectory<Vector4<f64>>) -> Option<f64> {
    trajectory
        .iter()
        .find(|(_, y)| y.iter().any(|v| !v.is_finite()))
        .map(|(t, _)| t)
}
