use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Aerodynamic reference geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroReference {
    /// Reference (wing) area (m²).
    pub s_ref: f64,
    /// Reference span, used for the roll and yaw moments (m).
    pub b_ref: f64,
    /// Reference chord, used for the pitch moment (m).
    pub c_ref: f64,
    /// Point about which the coefficient moments are defined, body frame (m).
    #[serde(default = "zero_vector")]
    pub r_ref: Vector3<f64>,
}

impl AeroReference {
    /// Creates a new `AeroReference` with moments defined about `r_ref`.
    ///
    /// # Arguments
    /// * `s_ref` - Reference area (m²).
    /// * `b_ref` - Reference span (m).
    /// * `c_ref` - Reference chord (m).
    /// * `r_ref` - Moment reference point in body axes (m).
    pub fn new(s_ref: f64, b_ref: f64, c_ref: f64, r_ref: Vector3<f64>) -> Self {
        Self {
            s_ref,
            b_ref,
            c_ref,
            r_ref,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.s_ref, self.b_ref, self.c_ref]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.r_ref.iter().all(|v| v.is_finite())
    }
}

pub(crate) fn zero_vector() -> Vector3<f64> {
    Vector3::zeros()
}
