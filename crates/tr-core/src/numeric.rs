use crate::error::{TrError, TrResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Largest number of fixed steps a single run may take.
pub const MAX_STEPS: usize = 100_000_000;

/// Absolute/relative tolerance pair for approximate comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Number of whole steps of size `dt` that fit in `[0, horizon]`.
///
/// # Errors
/// Returns [`TrError::InvalidArg`] if the count is not a finite,
/// non-negative number or exceeds [`MAX_STEPS`].
pub fn steps_within(horizon: Real, dt: Real) -> TrResult<usize> {
    let steps = (horizon / dt).floor();
    if !steps.is_finite() || steps < 0.0 {
        return Err(TrError::InvalidArg {
            what: "step count horizon/dt is not a finite non-negative number",
        });
    }
    if steps > MAX_STEPS as Real {
        return Err(TrError::InvalidArg {
            what: "step count horizon/dt exceeds MAX_STEPS",
        });
    }
    Ok(steps as usize)
}
