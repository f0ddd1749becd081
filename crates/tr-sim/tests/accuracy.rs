//! Integration test: accuracy of the integrated trajectory against the
//! closed-form response of a decoupled, harmonically driven rotor.
//!
//! With kB = lamB = 0 rotor 1 obeys
//!
//! ```text
//! I1 θ̈ + lamA θ̇ + kA θ = lamA θ̇0(t) + kA θ0(t),   θ0(t) = sin(ω t)
//! ```
//!
//! and rotor 2 drifts freely at its initial rate.

use tr_core::ParameterSet;
use tr_sim::{IntegratorType, SimConfig, StepPolicy, simulate};

const I1: f64 = 1.0;
const KA: f64 = 4.0;
const LAM_A: f64 = 0.4;
const OMEGA: f64 = 1.3;
const TH1_0: f64 = 0.2;
const TH1DOT_0: f64 = -0.1;

fn decoupled_params(tmax: f64) -> ParameterSet {
    ParameterSet {
        i1: I1,
        i2: 3.0,
        k_a: KA,
        k_b: 0.0,
        lam_a: LAM_A,
        lam_b: 0.0,
        omega: OMEGA,
        tmax,
        th1: TH1_0,
        th2: 0.5,
        th1dot: TH1DOT_0,
        th2dot: 0.25,
    }
}

/// Exact θ1(t) for the underdamped decoupled rotor.
fn exact_theta1(t: f64) -> f64 {
    // Steady-state response Im(H(iω) e^{iωt}), H(s) = (lamA s + kA) / (I1 s² + lamA s + kA).
    let (num_re, num_im) = (KA, LAM_A * OMEGA);
    let (den_re, den_im) = (KA - I1 * OMEGA * OMEGA, LAM_A * OMEGA);
    let den_norm = den_re * den_re + den_im * den_im;
    let h_re = (num_re * den_re + num_im * den_im) / den_norm;
    let h_im = (num_im * den_re - num_re * den_im) / den_norm;

    // Transient e^{-αt} (c1 cos ωd t + c2 sin ωd t) matching the initial conditions.
    let alpha = LAM_A / (2.0 * I1);
    let omega_d = (KA / I1 - alpha * alpha).sqrt();
    let c1 = TH1_0 - h_im;
    let c2 = (TH1DOT_0 - OMEGA * h_re + alpha * c1) / omega_d;

    let steady = h_re * (OMEGA * t).sin() + h_im * (OMEGA * t).cos();
    let transient = (-alpha * t).exp() * (c1 * (omega_d * t).cos() + c2 * (omega_d * t).sin());
    steady + transient
}

fn max_theta1_error(integrator: IntegratorType, dt: f64, tmax: f64) -> f64 {
    let config = SimConfig {
        step: StepPolicy::Fixed(dt),
        integrator,
        ..SimConfig::default()
    };
    let sim = simulate(&decoupled_params(tmax), &config).expect("simulation should run");
    sim.trajectory
        .iter()
        .map(|(t, y)| (y[0] - exact_theta1(t)).abs())
        .fold(0.0, f64::max)
}

#[test]
fn decoupled_rotor_matches_closed_form() {
    let err = max_theta1_error(IntegratorType::RK4, 0.01, 10.0);
    assert!(err < 1e-6, "max error {err:e} too large");
}

#[test]
fn decoupled_second_rotor_drifts_freely() {
    let config = SimConfig {
        step: StepPolicy::Fixed(0.05),
        ..SimConfig::default()
    };
    let sim = simulate(&decoupled_params(5.0), &config).unwrap();

    for (t, y) in sim.trajectory.iter() {
        assert!((y[1] - (0.5 + 0.25 * t)).abs() < 1e-12);
        assert!((y[3] - 0.25).abs() < 1e-12);
    }
}

#[test]
fn modal_step_is_usable_for_decoupled_rotor() {
    let sim = simulate(&decoupled_params(10.0), &SimConfig::default()).unwrap();
    let modal = sim.modal.unwrap();

    // Natural frequencies are sqrt(kA / I1) and the free rotor's zero.
    assert!((modal.natural_frequencies[1] - 2.0).abs() < 1e-12);
    assert!(modal.natural_frequencies[0].abs() < 1e-6);

    let worst = sim
        .trajectory
        .iter()
        .map(|(t, y)| (y[0] - exact_theta1(t)).abs())
        .fold(0.0, f64::max);
    assert!(worst < 2e-2, "max error {worst:e} with modal step");
}

/// Halving the step must shrink the error by roughly `2^order`.
fn assert_convergence_order(integrator: IntegratorType, dt: f64) {
    let coarse = max_theta1_error(integrator, dt, 2.0);
    let fine = max_theta1_error(integrator, dt / 2.0, 2.0);
    let ratio = coarse / fine;
    let expected = 2.0_f64.powi(integrator.order() as i32);
    assert!(
        (0.75 * expected..1.25 * expected).contains(&ratio),
        "{integrator:?}: error ratio {ratio}, expected about {expected} (coarse {coarse:e}, fine {fine:e})"
    );
}

#[test]
fn rk4_is_fourth_order() {
    assert_convergence_order(IntegratorType::RK4, 0.05);
}

#[test]
fn forward_euler_is_first_order() {
    assert_convergence_order(IntegratorType::ForwardEuler, 0.01);
}

#[test]
fn rk4_beats_forward_euler_at_equal_step() {
    let rk4 = max_theta1_error(IntegratorType::RK4, 0.05, 2.0);
    let euler = max_theta1_error(IntegratorType::ForwardEuler, 0.05, 2.0);
    assert!(rk4 * 100.0 < euler);
}
