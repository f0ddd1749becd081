//! Transient simulation engine for the two-rotor torsional assembly.
//!
//! Provides:
//! - Linear state-space model assembly (A, B, A⁻¹, P) from a parameter set
//! - Harmonic and unforced base excitation
//! - Modal analysis of the undamped subsystem for fixed step-size selection
//! - Fixed-step RK4 and forward Euler integrators
//! - A driver that runs the whole pipeline and records the trajectory

pub mod driver;
pub mod error;
pub mod forcing;
pub mod integrator;
pub mod modal;
pub mod model;
pub mod rotor;
pub mod sim;

// Re-exports for public API
pub use driver::{SimConfig, Simulation, integrate, simulate, simulate_with_progress};
pub use error::{SimError, SimResult};
pub use forcing::{Forcing, ForcingKind};
pub use integrator::{ForwardEuler, Integrator, IntegratorType, RK4};
pub use modal::{ModalAnalysis, StepPolicy, analyze, select_dt};
pub use model::StateSpaceModel;
pub use rotor::{RotorModel, assemble_matrices};
pub use sim::{SimOptions, SimProgress, Trajectory, run_sim, run_sim_with_progress};
