//! Integration test: mechanical energy of the unforced assembly.
//!
//! Without damping the energy must be conserved up to truncation error;
//! with damping it must not increase.

use tr_core::{ParameterSet, Tolerances, nearly_equal};
use tr_sim::{ForcingKind, SimConfig, StateSpaceModel, StepPolicy, simulate};

fn free_params(lam_a: f64, lam_b: f64) -> ParameterSet {
    ParameterSet {
        i1: 1.0,
        i2: 2.0,
        k_a: 3.0,
        k_b: 1.0,
        lam_a,
        lam_b,
        omega: 0.0,
        tmax: 50.0,
        th1: 0.5,
        th2: -0.2,
        th1dot: 0.0,
        th2dot: 0.3,
    }
}

#[test]
fn undamped_energy_is_conserved() {
    let params = free_params(0.0, 0.0);
    let config = SimConfig {
        step: StepPolicy::Fixed(0.01),
        ..SimConfig::default()
    };
    let sim = simulate(&params, &config).unwrap();
    let e0 = sim.model.energy(0.0, &sim.model.initial_state());
    assert!(e0 > 0.0);

    let tol = Tolerances { abs: 0.0, rel: 1e-6 };
    for (t, y) in sim.trajectory.iter() {
        let e = sim.model.energy(t, y);
        assert!(
            nearly_equal(e, e0, tol),
            "energy drifted to {e} from {e0} at t = {t}"
        );
    }
}

#[test]
fn undamped_energy_does_not_grow_with_modal_step() {
    // Ten samples per period keeps RK4 inside its stability region, where it
    // is slightly dissipative.
    let params = free_params(0.0, 0.0);
    let sim = simulate(&params, &SimConfig::default()).unwrap();
    let e0 = sim.model.energy(0.0, &sim.model.initial_state());

    for (t, y) in sim.trajectory.iter() {
        let e = sim.model.energy(t, y);
        assert!(e <= e0 * (1.0 + 1e-12), "energy grew to {e} at t = {t}");
    }
    let (t_end, y_end) = sim.trajectory.last().unwrap();
    assert!(sim.model.energy(t_end, y_end) > 0.5 * e0);
}

#[test]
fn damped_energy_is_non_increasing() {
    let params = free_params(0.3, 0.5);
    let config = SimConfig {
        forcing: ForcingKind::Unforced,
        step: StepPolicy::Fixed(0.01),
        ..SimConfig::default()
    };
    let sim = simulate(&params, &config).unwrap();
    let e0 = sim.model.energy(0.0, &sim.model.initial_state());

    let mut previous = e0;
    for (t, y) in sim.trajectory.iter() {
        let e = sim.model.energy(t, y);
        assert!(
            e <= previous + 1e-9 * e0,
            "energy rose from {previous} to {e} at t = {t}"
        );
        previous = e;
    }
    assert!(previous < 0.1 * e0, "damping should remove most energy");
}
