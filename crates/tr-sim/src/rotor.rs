//! Linear state-space model of the two-rotor torsional assembly.
//!
//! The equations of motion are written in first-order form
//!
//! ```text
//! A * dy/dt + B * y = F(t)
//! ```
//!
//! with state `y = [θ1, θ2, θ̇1, θ̇2]`, `A = diag(1, 1, I1, I2)` and the base
//! excitation entering rotor 1 through the (kA, lamA) pair:
//!
//! ```text
//! F(t) = [0, 0, lamA * θ̇0(t) + kA * θ0(t), 0]
//! ```
//!
//! The derivative is evaluated as `dy/dt = A⁻¹ F(t) - P y` with `P = A⁻¹ B`
//! computed once at assembly.

use nalgebra::{Matrix4, Vector4};
use tr_core::ParameterSet;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::forcing::{Forcing, ForcingKind};
use crate::model::StateSpaceModel;

/// Build the inertia matrix `A` and coupling matrix `B`.
pub fn assemble_matrices(params: &ParameterSet) -> (Matrix4<f64>, Matrix4<f64>) {
    let a = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, params.i1, params.i2));

    let (ka, kb) = (params.k_a, params.k_b);
    let (la, lb) = (params.lam_a, params.lam_b);
    #[rustfmt::skip]
    let b = Matrix4::new(
        0.0,     0.0,  -1.0,     0.0,
        0.0,     0.0,   0.0,    -1.0,
        ka + kb, -kb,   la + lb, -lb,
        -kb,     kb,   -lb,      lb,
    );

    (a, b)
}

/// Assembled, immutable model of one run.
#[derive(Clone, Debug)]
pub struct RotorModel {
    params: ParameterSet,
    forcing: Forcing,
    a: Matrix4<f64>,
    b: Matrix4<f64>,
    a_inv: Matrix4<f64>,
    p: Matrix4<f64>,
}

impl RotorModel {
    /// Assemble `A`, `B`, `A⁻¹` and `P = A⁻¹ B` for the given parameters.
    ///
    /// # Errors
    /// Returns [`SimError::SingularMatrix`] if either inertia is zero.
    pub fn assemble(params: &ParameterSet, forcing: ForcingKind) -> SimResult<Self> {
        let (a, b) = assemble_matrices(params);
        debug!("Matrix A:{a}");
        debug!("Matrix B:{b}");

        // try_inverse succeeds for tiny pivots; A is diagonal so test it directly.
        if params.i1 == 0.0 || params.i2 == 0.0 {
            return Err(SimError::SingularMatrix {
                what: "inertia matrix A (I1 or I2 is zero)",
            });
        }
        let a_inv = a.try_inverse().ok_or(SimError::SingularMatrix {
            what: "inertia matrix A",
        })?;
        debug!("Inverse of A:{a_inv}");

        let p = a_inv * b;
        debug!("Propagation matrix P:{p}");

        Ok(Self {
            params: params.clone(),
            forcing: Forcing::new(forcing, params.omega),
            a,
            b,
            a_inv,
            p,
        })
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn forcing(&self) -> Forcing {
        self.forcing
    }

    pub fn a(&self) -> &Matrix4<f64> {
        &self.a
    }

    pub fn b(&self) -> &Matrix4<f64> {
        &self.b
    }

    pub fn a_inv(&self) -> &Matrix4<f64> {
        &self.a_inv
    }

    pub fn propagation(&self) -> &Matrix4<f64> {
        &self.p
    }

    /// External forcing vector `F(t)`.
    pub fn forcing_vector(&self, t: f64) -> Vector4<f64> {
        let (theta, thetadot) = self.forcing.theta0(t);
        Vector4::new(
            0.0,
            0.0,
            self.params.lam_a * thetadot + self.params.k_a * theta,
            0.0,
        )
    }

    /// Total mechanical energy relative to the base position at time `t`.
    ///
    /// Kinetic energy of both rotors plus the strain energy stored in the
    /// base spring (kA) and the coupling spring (kB).
    pub fn energy(&self, t: f64, y: &Vector4<f64>) -> f64 {
        let p = &self.params;
        let (theta0, _) = self.forcing.theta0(t);
        let kinetic = 0.5 * p.i1 * y[2] * y[2] + 0.5 * p.i2 * y[3] * y[3];
        let base_twist = y[0] - theta0;
        let coupling_twist = y[1] - y[0];
        let strain = 0.5 * p.k_a * base_twist * base_twist
            + 0.5 * p.k_b * coupling_twist * coupling_twist;
        kinetic + strain
    }
}

impl StateSpaceModel for RotorModel {
    type State = Vector4<f64>;

    fn initial_state(&self) -> Self::State {
        Vector4::from(self.params.initial_state())
    }

    fn derivative(&self, t: f64, y: &Self::State) -> Self::State {
        self.a_inv * self.forcing_vector(t) - self.p * y
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        a + b
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        a * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ParameterSet {
        ParameterSet {
            i1: 2.0,
            i2: 4.0,
            k_a: 3.0,
            k_b: 5.0,
            lam_a: 0.5,
            lam_b: 0.25,
            omega: 1.5,
            tmax: 10.0,
            th1: 0.1,
            th2: -0.2,
            th1dot: 0.3,
            th2dot: 0.0,
        }
    }

    #[test]
    fn matrices_layout() {
        let (a, b) = assemble_matrices(&params());

        assert_eq!(a, Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 2.0, 4.0)));
        assert_eq!(b[(0, 2)], -1.0);
        assert_eq!(b[(1, 3)], -1.0);
        assert_eq!(b[(2, 0)], 8.0);
        assert_eq!(b[(2, 1)], -5.0);
        assert_eq!(b[(2, 2)], 0.75);
        assert_eq!(b[(2, 3)], -0.25);
        assert_eq!(b[(3, 0)], -5.0);
        assert_eq!(b[(3, 1)], 5.0);
        assert_eq!(b[(3, 2)], -0.25);
        assert_eq!(b[(3, 3)], 0.25);
    }

    #[test]
    fn propagation_is_ainv_times_b() {
        let model = RotorModel::assemble(&params(), ForcingKind::Driven).unwrap();

        assert!((model.a() * model.a_inv() - Matrix4::identity()).norm() < 1e-14);
        // Velocity rows are B scaled by 1/I.
        assert!((model.propagation()[(2, 0)] - 4.0).abs() < 1e-14);
        assert!((model.propagation()[(3, 1)] - 1.25).abs() < 1e-14);
        // Position rows pass the rates through.
        assert_eq!(model.propagation()[(0, 2)], -1.0);
    }

    #[test]
    fn zero_inertia_is_singular() {
        let p = ParameterSet { i1: 0.0, ..params() };
        let err = RotorModel::assemble(&p, ForcingKind::Driven).unwrap_err();
        assert!(matches!(err, SimError::SingularMatrix { .. }));

        let p = ParameterSet { i2: 0.0, ..params() };
        assert!(RotorModel::assemble(&p, ForcingKind::Driven).is_err());
    }

    #[test]
    fn derivative_matches_equations_of_motion() {
        let p = params();
        let model = RotorModel::assemble(&p, ForcingKind::Driven).unwrap();
        let y = Vector4::new(0.1, -0.2, 0.3, 0.4);
        let t = 0.7;

        let dydt = model.derivative(t, &y);

        let (th0, th0dot) = (1.5_f64 * t).sin_cos();
        let (theta, thetadot) = (th0, 1.5 * th0dot);
        let torque1 = p.k_a * (theta - y[0]) + p.lam_a * (thetadot - y[2])
            + p.k_b * (y[1] - y[0])
            + p.lam_b * (y[3] - y[2]);
        let torque2 = p.k_b * (y[0] - y[1]) + p.lam_b * (y[2] - y[3]);

        assert!((dydt[0] - y[2]).abs() < 1e-14);
        assert!((dydt[1] - y[3]).abs() < 1e-14);
        assert!((dydt[2] - torque1 / p.i1).abs() < 1e-12);
        assert!((dydt[3] - torque2 / p.i2).abs() < 1e-12);
    }

    #[test]
    fn derivative_does_not_mutate_and_is_repeatable() {
        let model = RotorModel::assemble(&params(), ForcingKind::Driven).unwrap();
        let y = model.initial_state();
        let first = model.derivative(0.25, &y);
        let second = model.derivative(0.25, &y);
        assert_eq!(first, second);
        assert_eq!(y, Vector4::new(0.1, -0.2, 0.3, 0.0));
    }

    #[test]
    fn unforced_rest_state_is_equilibrium() {
        let model = RotorModel::assemble(&params(), ForcingKind::Unforced).unwrap();
        let dydt = model.derivative(1.0, &Vector4::zeros());
        assert_eq!(dydt, Vector4::zeros());
    }

    #[test]
    fn energy_of_rest_state_is_zero() {
        let model = RotorModel::assemble(&params(), ForcingKind::Unforced).unwrap();
        assert_eq!(model.energy(0.0, &Vector4::zeros()), 0.0);

        let y = Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((model.energy(0.0, &y) - 1.0).abs() < 1e-14);
    }
}
