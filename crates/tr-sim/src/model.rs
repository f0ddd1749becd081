//! StateSpaceModel trait for pluggable dynamic systems.

/// Trait for systems that can be advanced by the fixed-step integrators.
///
/// A StateSpaceModel provides:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - Derivative computation: x_dot = f(t, x)
/// - Vector arithmetic for integration: add states, scale by scalar
///
/// The model is borrowed immutably for the whole run, so one assembled model
/// can back any number of independent simulations.
pub trait StateSpaceModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x). Must not depend on any state
    /// other than `t`, `x` and the model itself.
    fn derivative(&self, t: f64, x: &Self::State) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}
