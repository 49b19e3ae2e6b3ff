pub mod datcom;
pub mod derivatives;

pub use datcom::DatcomTableModel;
pub use derivatives::{
    DragCoefficients, LiftCoefficients, PitchCoefficients, RollCoefficients,
    SideForceCoefficients, StabilityDerivatives, YawCoefficients,
};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::controls::ControlSurfaces;
use crate::utils::Result;

/// Flow condition handed to a coefficient model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroQuery {
    /// Angle of attack (rad)
    pub alpha: f64,
    /// Sideslip (rad)
    pub beta: f64,
    pub mach: f64,
    pub surfaces: ControlSurfaces,
    /// Non-dimensional body rates `(b p, c q, b r) / 2V`
    pub rates_hat: Vector3<f64>,
}

/// Body-axis force and moment coefficients.
///
/// Moments are about the aerodynamic reference point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    /// (CX, CY, CZ)
    pub force: Vector3<f64>,
    /// (Cl, Cm, Cn)
    pub moment: Vector3<f64>,
}

impl AeroCoefficients {
    pub fn new(force: Vector3<f64>, moment: Vector3<f64>) -> Self {
        Self { force, moment }
    }

    /// Copy with NaN entries replaced by zero.
    pub fn sanitized(self) -> Self {
        let clean = |v: Vector3<f64>| v.map(|c| if c.is_nan() { 0.0 } else { c });
        Self {
            force: clean(self.force),
            moment: clean(self.moment),
        }
    }
}

/// Aerodynamic coefficient source.
///
/// Implementations are shared read-only across trim workers.
pub trait AeroLookup: Send + Sync {
    fn coefficients(&self, query: &AeroQuery) -> Result<AeroCoefficients>;
}

impl<F> AeroLookup for F
where
    F: Fn(&AeroQuery) -> Result<AeroCoefficients> + Send + Sync,
{
    fn coefficients(&self, query: &AeroQuery) -> Result<AeroCoefficients> {
        self(query)
    }
}

/// Rotate lift / drag / side-force coefficients into body axes.
///
/// `CX = -CD cos(alpha) + CL sin(alpha)`, `CZ = -CD sin(alpha) - CL cos(alpha)`.
pub fn wind_to_body(c_d: f64, c_y: f64, c_l: f64, alpha: f64) -> Vector3<f64> {
    let (sa, ca) = alpha.sin_cos();
    Vector3::new(-c_d * ca + c_l * sa, c_y, -c_d * sa - c_l * ca)
}
