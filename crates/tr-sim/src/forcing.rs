//! Prescribed base excitation.

use serde::{Deserialize, Serialize};

/// Which excitation a run applies at the driven end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcingKind {
    /// Harmonic base rotation `sin(omega * t)`.
    #[default]
    Driven,
    /// Base held at rest.
    Unforced,
}

/// Base rotation as a closed-form function of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Forcing {
    Harmonic { omega: f64 },
    Unforced,
}

impl Forcing {
    pub fn new(kind: ForcingKind, omega: f64) -> Self {
        match kind {
            ForcingKind::Driven => Forcing::Harmonic { omega },
            ForcingKind::Unforced => Forcing::Unforced,
        }
    }

    /// Base angle and angular rate at time `t`.
    pub fn theta0(&self, t: f64) -> (f64, f64) {
        match *self {
            Forcing::Harmonic { omega } => ((omega * t).sin(), omega * (omega * t).cos()),
            Forcing::Unforced => (0.0, 0.0),
        }
    }
}
