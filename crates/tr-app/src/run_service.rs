//! Run execution service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tr_results::{DEFAULT_LABELS, RunManifest};
use tr_sim::{RotorModel, SimConfig, SimError, SimProgress};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::params_service;
use crate::progress::{IntegrationProgress, RunProgressEvent, RunStage};

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub params_path: &'a Path,
    pub config: SimConfig,
    /// Trajectory CSV destination; `None` skips the export.
    pub csv_path: Option<&'a Path>,
    /// Column labels for the state components.
    pub labels: Vec<String>,
    /// Manifest JSON destination; `None` skips it.
    pub manifest_path: Option<&'a Path>,
    /// Directory for the per-rotor PNG charts; `None` skips plotting.
    pub plot_dir: Option<&'a Path>,
}

impl<'a> RunRequest<'a> {
    /// Request with the default configuration, labels and no outputs.
    pub fn new(params_path: &'a Path) -> Self {
        Self {
            params_path,
            config: SimConfig::default(),
            csv_path: None,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            manifest_path: None,
            plot_dir: None,
        }
    }
}

/// Wall-clock breakdown of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub simulate_time_s: f64,
    pub export_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub manifest: RunManifest,
    /// Last recorded time and state, absent when no step fit the horizon.
    pub final_state: Option<(f64, [f64; 4])>,
    pub csv_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub plot_paths: Vec<PathBuf>,
    pub timing: RunTimingSummary,
}

fn emit_stage(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Execute a run.
pub fn run(request: &RunRequest) -> AppResult<RunResponse> {
    run_with_progress(request, None)
}

/// Execute a run and stream progress events.
pub fn run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_stage(
        &mut progress_cb,
        RunStage::LoadingParameters,
        started,
        Some(format!("Reading {}", request.params_path.display())),
    );
    let load_started = Instant::now();
    let params = params_service::load_parameters(request.params_path)?;
    timing.load_time_s = load_started.elapsed().as_secs_f64();

    let config = &request.config;
    if config.check_admissibility {
        params.check_admissible().map_err(SimError::from)?;
    }

    emit_stage(&mut progress_cb, RunStage::AssemblingModel, started, None);
    let sim_started = Instant::now();
    let model = RotorModel::assemble(&params, config.forcing)?;

    emit_stage(&mut progress_cb, RunStage::SelectingStep, started, None);
    let (dt, modal) = config.step.resolve(&params)?;

    let t_end_s = params.tmax;
    let sim = {
        let mut on_step = |p: SimProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                let fraction_complete = if p.total_steps == 0 {
                    1.0
                } else {
                    p.step as f64 / p.total_steps as f64
                };
                cb(RunProgressEvent {
                    stage: RunStage::Integrating,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    integration: Some(IntegrationProgress {
                        sim_time_s: p.t,
                        t_end_s,
                        fraction_complete,
                        step: p.step,
                        total_steps: p.total_steps,
                    }),
                });
            }
        };
        tr_sim::integrate(model, dt, modal, config.integrator, Some(&mut on_step))?
    };
    timing.simulate_time_s = sim_started.elapsed().as_secs_f64();
    info!(
        "Integrated {} steps of dt={:.3e} in {:.3}s",
        sim.trajectory.len(),
        sim.dt,
        timing.simulate_time_s
    );

    let manifest = RunManifest::from_simulation(&sim, &request.config);

    let export_started = Instant::now();
    if let Some(path) = request.csv_path {
        emit_stage(
            &mut progress_cb,
            RunStage::Exporting,
            started,
            Some(format!("Writing {}", path.display())),
        );
        tr_results::export_csv(path, &sim.trajectory, request.labels.as_slice())
            .map_err(|e| AppError::from_results(e, path))?;
    }
    let mut plot_paths = Vec::new();
    if let Some(dir) = request.plot_dir {
        emit_stage(
            &mut progress_cb,
            RunStage::Exporting,
            started,
            Some(format!("Plotting into {}", dir.display())),
        );
        plot_paths = tr_results::export_plots(dir, &sim.trajectory)
            .map_err(|e| AppError::from_results(e, dir))?;
    }
    if let Some(path) = request.manifest_path {
        manifest
            .save(path)
            .map_err(|e| AppError::from_results(e, path))?;
    }
    timing.export_time_s = export_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    emit_stage(&mut progress_cb, RunStage::Completed, started, None);

    let final_state = sim
        .trajectory
        .last()
        .map(|(t, y)| (t, [y[0], y[1], y[2], y[3]]));

    Ok(RunResponse {
        manifest,
        final_state,
        csv_path: request.csv_path.map(Path::to_path_buf),
        manifest_path: request.manifest_path.map(Path::to_path_buf),
        plot_paths,
        timing,
    })
}
