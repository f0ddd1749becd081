//! Modal analysis of the undamped subsystem and fixed step-size selection.
//!
//! The undamped, unforced rotors obey `M θ̈ + K θ = 0` with
//!
//! ```text
//! K = | kA + kB   -kB |      M = | I1   0 |
//!     |   -kB      kB |          |  0  I2 |
//! ```
//!
//! The squared natural frequencies are the eigenvalues of `M⁻¹K`. For
//! positive inertias they are computed from the mass-normalized symmetric
//! matrix `M^-1/2 K M^-1/2`, which shares the eigenvalues of `M⁻¹K`.

use std::f64::consts::PI;

use nalgebra::{Matrix2, SymmetricEigen};
use serde::{Deserialize, Serialize};
use tr_core::ParameterSet;
use tracing::info;

use crate::error::{SimError, SimResult};

/// Samples per period of the fastest relevant oscillation.
pub const SAMPLES_PER_PERIOD: f64 = 10.0;

/// How the fixed integration step is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// Derived from the natural frequencies and the drive frequency.
    #[default]
    Modal,
    /// Caller-supplied step (s).
    Fixed(f64),
}

/// Result of the natural-frequency analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalAnalysis {
    /// Eigenvalues of `M⁻¹K` (ω_n², rad²/s²), ascending.
    pub eigenvalues: [f64; 2],
    /// Natural frequencies `sqrt(|λ|)` (rad/s), in eigenvalue order.
    pub natural_frequencies: [f64; 2],
    /// Fastest relevant frequency, structural or drive (Hz).
    pub f_max: f64,
    /// Selected time step (s).
    pub dt: f64,
}

pub fn stiffness_matrix(params: &ParameterSet) -> Matrix2<f64> {
    let (ka, kb) = (params.k_a, params.k_b);
    Matrix2::new(ka + kb, -kb, -kb, kb)
}

pub fn inertia_matrix(params: &ParameterSet) -> Matrix2<f64> {
    Matrix2::new(params.i1, 0.0, 0.0, params.i2)
}

/// Eigenvalues of `M⁻¹K` in ascending order.
///
/// # Errors
/// Returns [`SimError::SingularMatrix`] if `M` is not invertible.
pub fn stiffness_eigenvalues(params: &ParameterSet) -> SimResult<[f64; 2]> {
    let k = stiffness_matrix(params);
    let m = inertia_matrix(params);
    if params.i1 == 0.0 || params.i2 == 0.0 {
        return Err(SimError::SingularMatrix {
            what: "inertia matrix M (I1 or I2 is zero)",
        });
    }
    let m_inv = m.try_inverse().ok_or(SimError::SingularMatrix {
        what: "inertia matrix M",
    })?;

    let mut values = if params.i1 > 0.0 && params.i2 > 0.0 {
        let scale = Matrix2::new(params.i1.sqrt().recip(), 0.0, 0.0, params.i2.sqrt().recip());
        let symmetric = scale * k * scale;
        let eigen = SymmetricEigen::new(symmetric);
        [eigen.eigenvalues[0], eigen.eigenvalues[1]]
    } else {
        // Negative inertia: M⁻¹K is not similar to a symmetric matrix, so
        // fall back to the general eigenvalues and keep their magnitudes.
        let eigen = (m_inv * k).complex_eigenvalues();
        [eigen[0].norm(), eigen[1].norm()]
    };
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values)
}

/// Natural frequencies, drive-aware maximum frequency and resulting step.
///
/// # Errors
/// - [`SimError::SingularMatrix`] if `M` is not invertible
/// - [`SimError::DivideByZero`] if every frequency (structural and drive) is zero
pub fn analyze(params: &ParameterSet) -> SimResult<ModalAnalysis> {
    let eigenvalues = stiffness_eigenvalues(params)?;
    let natural_frequencies = eigenvalues.map(|lambda| lambda.abs().sqrt());
    info!("Natural frequencies omega_n: {natural_frequencies:?}");

    let omega_max = natural_frequencies
        .iter()
        .copied()
        .fold(params.omega.abs(), f64::max);
    let f_max = omega_max / (2.0 * PI);
    if f_max == 0.0 {
        return Err(SimError::DivideByZero {
            what: "no natural or drive frequency to resolve (f_max = 0)",
        });
    }

    let dt = 1.0 / (SAMPLES_PER_PERIOD * f_max);
    info!("Time step dt={dt:.3e} (f_max = {f_max:.4} Hz)");

    Ok(ModalAnalysis {
        eigenvalues,
        natural_frequencies,
        f_max,
        dt,
    })
}

/// Step size chosen by modal analysis.
pub fn select_dt(params: &ParameterSet) -> SimResult<f64> {
    Ok(analyze(params)?.dt)
}

impl StepPolicy {
    /// Resolve the step for a run, with the analysis when one was performed.
    pub fn resolve(&self, params: &ParameterSet) -> SimResult<(f64, Option<ModalAnalysis>)> {
        match *self {
            StepPolicy::Modal => {
                let analysis = analyze(params)?;
                Ok((analysis.dt, Some(analysis)))
            }
            StepPolicy::Fixed(dt) => {
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(SimError::InvalidArg {
                        what: "fixed dt must be positive and finite",
                    });
                }
                info!("Time step dt={dt:.3e} (fixed)");
                Ok((dt, None))
            }
        }
    }
}
