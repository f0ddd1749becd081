//! Fixed-step time integrators.

use serde::{Deserialize, Serialize};

use crate::model::StateSpaceModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the model.
    fn step<M: StateSpaceModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State;
}

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 derivative calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 derivative call per step).
    ForwardEuler,
}

impl IntegratorType {
    /// Advance one step with the selected scheme.
    pub fn step<M: StateSpaceModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        match self {
            IntegratorType::RK4 => RK4.step(model, t, x, dt),
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, dt),
        }
    }

    /// Global order of accuracy.
    pub fn order(&self) -> u32 {
        match self {
            IntegratorType::RK4 => 4,
            IntegratorType::ForwardEuler => 1,
        }
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: StateSpaceModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        let k1 = model.derivative(t, x);

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.derivative(t + 0.5 * dt, &x2);

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.derivative(t + 0.5 * dt, &x3);

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.derivative(t + dt, &x4);

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        model.add(x, &model.scale(&k_sum, dt / 6.0))
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls derivative() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: StateSpaceModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        let xdot = model.derivative(t, x);
        model.add(x, &model.scale(&xdot, dt))
    }
}
