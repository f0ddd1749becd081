//! Physical parameters of the two-rotor assembly.

use std::collections::BTreeMap;

use crate::error::{TrError, TrResult};
use crate::numeric::Real;

/// Keys every parameter source must provide, in canonical order.
pub const PARAMETER_KEYS: [&str; 12] = [
    "I1", "I2", "kA", "kB", "lamA", "lamB", "omega", "tmax", "th1", "th2", "th1dot", "th2dot",
];

/// Validated, immutable set of physical quantities for one run.
///
/// Rotor 1 is tied to the driven base through the spring/damper pair
/// (`k_a`, `lam_a`); rotors 1 and 2 are tied together through (`k_b`, `lam_b`).
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    /// Rotational inertia of rotor 1 (kg·m²)
    pub i1: Real,
    /// Rotational inertia of rotor 2 (kg·m²)
    pub i2: Real,
    /// Torsional stiffness between base and rotor 1 (N·m/rad)
    pub k_a: Real,
    /// Torsional stiffness between rotor 1 and rotor 2 (N·m/rad)
    pub k_b: Real,
    /// Torsional damping between base and rotor 1 (N·m·s/rad)
    pub lam_a: Real,
    /// Torsional damping between rotor 1 and rotor 2 (N·m·s/rad)
    pub lam_b: Real,
    /// Drive angular frequency (rad/s)
    pub omega: Real,
    /// Simulation horizon (s)
    pub tmax: Real,
    pub th1: Real,
    pub th2: Real,
    pub th1dot: Real,
    pub th2dot: Real,
}

impl ParameterSet {
    /// Build a parameter set from a key→value map.
    ///
    /// Every key in [`PARAMETER_KEYS`] must be present with a finite value.
    /// Extra keys are ignored. Physical admissibility is checked separately by
    /// [`ParameterSet::check_admissible`].
    pub fn from_map(map: &BTreeMap<String, Real>) -> TrResult<Self> {
        let get = |key: &'static str| -> TrResult<Real> {
            let value = *map.get(key).ok_or(TrError::MissingParameter { key })?;
            if !value.is_finite() {
                return Err(TrError::NonFinite { key, value });
            }
            Ok(value)
        };

        Ok(Self {
            i1: get("I1")?,
            i2: get("I2")?,
            k_a: get("kA")?,
            k_b: get("kB")?,
            lam_a: get("lamA")?,
            lam_b: get("lamB")?,
            omega: get("omega")?,
            tmax: get("tmax")?,
            th1: get("th1")?,
            th2: get("th2")?,
            th1dot: get("th1dot")?,
            th2dot: get("th2dot")?,
        })
    }

    /// Values keyed by their canonical names.
    pub fn to_map(&self) -> BTreeMap<String, Real> {
        PARAMETER_KEYS
            .iter()
            .zip(self.values())
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Values in [`PARAMETER_KEYS`] order.
    pub fn values(&self) -> [Real; 12] {
        [
            self.i1,
            self.i2,
            self.k_a,
            self.k_b,
            self.lam_a,
            self.lam_b,
            self.omega,
            self.tmax,
            self.th1,
            self.th2,
            self.th1dot,
            self.th2dot,
        ]
    }

    /// Initial state `[theta1, theta2, theta1dot, theta2dot]`.
    pub fn initial_state(&self) -> [Real; 4] {
        [self.th1, self.th2, self.th1dot, self.th2dot]
    }

    /// Reject physically inadmissible values.
    ///
    /// Inertias and horizon must be strictly positive; stiffnesses and
    /// damping coefficients must be non-negative. All values must be finite.
    pub fn check_admissible(&self) -> TrResult<()> {
        for (key, value) in PARAMETER_KEYS.iter().copied().zip(self.values()) {
            if !value.is_finite() {
                return Err(TrError::NonFinite { key, value });
            }
        }

        let positive = [("I1", self.i1), ("I2", self.i2), ("tmax", self.tmax)];
        for (key, value) in positive {
            if value <= 0.0 {
                return Err(TrError::OutOfDomain {
                    key,
                    value,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("kA", self.k_a),
            ("kB", self.k_b),
            ("lamA", self.lam_a),
            ("lamB", self.lam_b),
        ];
        for (key, value) in non_negative {
            if value < 0.0 {
                return Err(TrError::OutOfDomain {
                    key,
                    value,
                    reason: "must be non-negative",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> BTreeMap<String, Real> {
        PARAMETER_KEYS
            .iter()
            .map(|k| (k.to_string(), 1.0))
            .collect()
    }

    #[test]
    fn from_map_reads_all_keys() {
        let mut map = sample_map();
        map.insert("kB".to_string(), 2.5);
        map.insert("th2dot".to_string(), -0.5);

        let params = ParameterSet::from_map(&map).unwrap();
        assert_eq!(params.k_b, 2.5);
        assert_eq!(params.th2dot, -0.5);
        assert_eq!(params.initial_state(), [1.0, 1.0, 1.0, -0.5]);
    }

    #[test]
    fn from_map_reports_missing_key() {
        let mut map = sample_map();
        map.remove("lamA");

        let err = ParameterSet::from_map(&map).unwrap_err();
        assert_eq!(err, TrError::MissingParameter { key: "lamA" });
        assert!(format!("{err}").contains("lamA"));
    }

    #[test]
    fn from_map_rejects_nan() {
        let mut map = sample_map();
        map.insert("omega".to_string(), Real::NAN);

        let err = ParameterSet::from_map(&map).unwrap_err();
        assert!(matches!(err, TrError::NonFinite { key: "omega", .. }));
    }

    #[test]
    fn from_map_ignores_extra_keys() {
        let mut map = sample_map();
        map.insert("comment_value".to_string(), 42.0);
        assert!(ParameterSet::from_map(&map).is_ok());
    }

    #[test]
    fn to_map_roundtrips() {
        let params = ParameterSet::from_map(&sample_map()).unwrap();
        let again = ParameterSet::from_map(&params.to_map()).unwrap();
        assert_eq!(params, again);
    }

    #[test]
    fn admissibility_checks() {
        let params = ParameterSet::from_map(&sample_map()).unwrap();
        assert!(params.check_admissible().is_ok());

        let zero_inertia = ParameterSet { i2: 0.0, ..params.clone() };
        assert!(matches!(
            zero_inertia.check_admissible(),
            Err(TrError::OutOfDomain { key: "I2", .. })
        ));

        let negative_damping = ParameterSet {
            lam_b: -0.1,
            ..params.clone()
        };
        assert!(matches!(
            negative_damping.check_admissible(),
            Err(TrError::OutOfDomain { key: "lamB", .. })
        ));

        let no_coupling = ParameterSet {
            k_b: 0.0,
            lam_b: 0.0,
            ..params
        };
        assert!(no_coupling.check_admissible().is_ok());
    }
}
