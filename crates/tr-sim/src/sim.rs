//! Fixed-step simulation runner and trajectory recording.

use tr_core::{TrError, steps_within};

use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorType;
use crate::model::StateSpaceModel;

/// Upper bound on the trajectory capacity reserved before the first step.
const RESERVE_STEPS: usize = 1 << 16;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    /// Number of steps taken: `floor(t_end / dt)`.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidArg`] if the count is unbounded or exceeds
    /// [`tr_core::MAX_STEPS`].
    pub fn step_count(&self) -> SimResult<usize> {
        steps_within(self.t_end, self.dt).map_err(|err| match err {
            TrError::InvalidArg { what } => SimError::InvalidArg { what },
            other => SimError::Parameter(other),
        })
    }
}

/// Progress snapshot emitted after every step.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    /// Steps completed so far (1-based)
    pub step: usize,
    pub total_steps: usize,
    /// Simulation time reached (seconds)
    pub t: f64,
}

/// Time history of a run.
///
/// Entry `i` holds the state after `i + 1` steps; the initial state is not
/// recorded.
#[derive(Clone, Debug)]
pub struct Trajectory<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> Trajectory<S> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn last(&self) -> Option<(f64, &S)> {
        Some((*self.t.last()?, self.x.last()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &S)> {
        self.t.iter().copied().zip(self.x.iter())
    }
}

/// Run a fixed-step simulation.
pub fn run_sim<M: StateSpaceModel>(model: &M, opts: &SimOptions) -> SimResult<Trajectory<M::State>> {
    run_sim_with_progress(model, opts, None)
}

/// Run a fixed-step simulation, reporting progress after each step.
pub fn run_sim_with_progress<M: StateSpaceModel>(
    model: &M,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<Trajectory<M::State>> {
    if !opts.dt.is_finite() || opts.dt <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be positive and finite",
        });
    }
    if !opts.t_end.is_finite() || opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative and finite",
        });
    }

    let total_steps = opts.step_count()?;
    let reserve = total_steps.min(RESERVE_STEPS);
    let mut t_record = Vec::with_capacity(reserve);
    let mut x_record = Vec::with_capacity(reserve);

    let mut x = model.initial_state();
    for i in 0..total_steps {
        let t = i as f64 * opts.dt;
        x = opts.integrator.step(model, t, &x, opts.dt);

        // Multiply rather than accumulate so the final time is exactly N * dt.
        let t_next = (i + 1) as f64 * opts.dt;
        t_record.push(t_next);
        x_record.push(x.clone());

        if let Some(cb) = progress.as_deref_mut() {
            cb(SimProgress {
                step: i + 1,
                total_steps,
                t: t_next,
            });
        }
    }

    Ok(Trajectory {
        t: t_record,
        x: x_record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant;

    impl StateSpaceModel for Constant {
        type State = f64;

        fn initial_state(&self) -> f64 {
            0.0
        }

        fn derivative(&self, _t: f64, _x: &f64) -> f64 {
            1.0
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 1e-3);
        assert_eq!(opts.t_end, 1.0);
        assert_eq!(opts.integrator, IntegratorType::RK4);
    }

    #[test]
    fn sim_options_invalid() {
        let zero_dt = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(matches!(
            run_sim(&Constant, &zero_dt),
            Err(SimError::InvalidArg { .. })
        ));

        let negative_end = SimOptions {
            t_end: -1.0,
            ..SimOptions::default()
        };
        assert!(run_sim(&Constant, &negative_end).is_err());
    }

    #[test]
    fn oversized_horizon_is_rejected_before_stepping() {
        let opts = SimOptions {
            dt: 0.5,
            t_end: 1e20,
            integrator: IntegratorType::RK4,
        };
        assert!(matches!(
            opts.step_count(),
            Err(SimError::InvalidArg { .. })
        ));

        let mut calls = 0;
        let mut cb = |_: SimProgress| calls += 1;
        let result = run_sim_with_progress(&Constant, &opts, Some(&mut cb));
        assert!(matches!(result, Err(SimError::InvalidArg { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn records_one_entry_per_step() {
        let opts = SimOptions {
            dt: 0.25,
            t_end: 1.1,
            integrator: IntegratorType::ForwardEuler,
        };
        let record = run_sim(&Constant, &opts).unwrap();

        assert_eq!(record.len(), 4);
        assert_eq!(record.t, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(record.x, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(record.last(), Some((1.0, &1.0)));
    }

    #[test]
    fn horizon_shorter_than_step_is_empty() {
        let opts = SimOptions {
            dt: 0.5,
            t_end: 0.2,
            integrator: IntegratorType::RK4,
        };
        let record = run_sim(&Constant, &opts).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.last(), None);
    }

    #[test]
    fn progress_reports_every_step() {
        let opts = SimOptions {
            dt: 0.1,
            t_end: 0.5,
            integrator: IntegratorType::RK4,
        };
        let mut seen = Vec::new();
        let mut cb = |p: SimProgress| seen.push((p.step, p.total_steps));
        run_sim_with_progress(&Constant, &opts, Some(&mut cb)).unwrap();

        assert_eq!(seen, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }
}
