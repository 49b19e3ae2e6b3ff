use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{wind_to_body, AeroCoefficients, AeroLookup, AeroQuery};
use crate::utils::{Result, SimError};

/// Drag polynomial in alpha, wind axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCoefficients {
    pub c_d_0: f64,
    pub c_d_alpha: f64,
    pub c_d_alpha2: f64,
    pub c_d_alpha_q: f64,
    pub c_d_alpha_deltae: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftCoefficients {
    pub c_l_0: f64,
    pub c_l_alpha: f64,
    pub c_l_alpha2: f64,
    pub c_l_q: f64,
    pub c_l_deltae: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideForceCoefficients {
    pub c_y_beta: f64,
    pub c_y_p: f64,
    pub c_y_r: f64,
    pub c_y_deltaa: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollCoefficients {
    pub c_l_beta: f64,
    pub c_l_p: f64,
    pub c_l_r: f64,
    pub c_l_deltaa: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchCoefficients {
    pub c_m_0: f64,
    pub c_m_alpha: f64,
    pub c_m_q: f64,
    pub c_m_deltae: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YawCoefficients {
    pub c_n_beta: f64,
    pub c_n_p: f64,
    pub c_n_r: f64,
    pub c_n_deltaa: f64,
}

/// Polynomial stability-derivative model.
///
/// Lift, drag and side force are evaluated in wind axes and rotated into body
/// axes through alpha. Rates enter non-dimensionalised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityDerivatives {
    pub drag: DragCoefficients,
    pub lift: LiftCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
}

impl StabilityDerivatives {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let derivatives: Self = serde_yaml::from_str(yaml)?;
        derivatives.validate()?;
        Ok(derivatives)
    }

    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// (CD, CY, CL) in wind axes.
    pub fn wind_axis_forces(&self, query: &AeroQuery) -> Vector3<f64> {
        let AeroQuery {
            alpha,
            beta,
            surfaces,
            rates_hat,
            ..
        } = *query;
        let (p_hat, q_hat, r_hat) = (rates_hat.x, rates_hat.y, rates_hat.z);

        let c_d = self.drag.c_d_0
            + self.drag.c_d_alpha * alpha
            + self.drag.c_d_alpha2 * alpha.powi(2)
            + self.drag.c_d_alpha_q * alpha * q_hat
            + self.drag.c_d_alpha_deltae * alpha * surfaces.elevator;

        let c_y = self.side_force.c_y_beta * beta
            + self.side_force.c_y_p * p_hat
            + self.side_force.c_y_r * r_hat
            + self.side_force.c_y_deltaa * surfaces.aileron;

        let c_l = self.lift.c_l_0
            + self.lift.c_l_alpha * alpha
            + self.lift.c_l_alpha2 * alpha.powi(2)
            + self.lift.c_l_q * q_hat
            + self.lift.c_l_deltae * surfaces.elevator;

        Vector3::new(c_d, c_y, c_l)
    }

    /// (Cl, Cm, Cn) in body axes.
    pub fn moments(&self, query: &AeroQuery) -> Vector3<f64> {
        let AeroQuery {
            alpha,
            beta,
            surfaces,
            rates_hat,
            ..
        } = *query;
        let (p_hat, q_hat, r_hat) = (rates_hat.x, rates_hat.y, rates_hat.z);

        let c_l_roll = self.roll.c_l_beta * beta
            + self.roll.c_l_p * p_hat
            + self.roll.c_l_r * r_hat
            + self.roll.c_l_deltaa * surfaces.aileron;

        let c_m = self.pitch.c_m_0
            + self.pitch.c_m_alpha * alpha
            + self.pitch.c_m_q * q_hat
            + self.pitch.c_m_deltae * surfaces.elevator;

        let c_n = self.yaw.c_n_beta * beta
            + self.yaw.c_n_p * p_hat
            + self.yaw.c_n_r * r_hat
            + self.yaw.c_n_deltaa * surfaces.aileron;

        Vector3::new(c_l_roll, c_m, c_n)
    }

    pub fn validate(&self) -> Result<()> {
        let serialized = serde_json::to_value(self)?;
        let finite = serialized
            .as_object()
            .into_iter()
            .flat_map(|families| families.values())
            .filter_map(|family| family.as_object())
            .flat_map(|family| family.values())
            .all(|v| v.as_f64().is_some_and(f64::is_finite));
        if finite {
            Ok(())
        } else {
            Err(SimError::InvalidConfig(
                "stability derivatives must be finite".into(),
            ))
        }
    }
}

impl AeroLookup for StabilityDerivatives {
    fn coefficients(&self, query: &AeroQuery) -> Result<AeroCoefficients> {
        let wind = self.wind_axis_forces(query);
        Ok(AeroCoefficients::new(
            wind_to_body(wind.x, wind.y, wind.z, query.alpha),
            self.moments(query),
        ))
    }
}
