use serde::{Deserialize, Serialize};

use crate::components::vehicle::VehicleParameters;
use crate::utils::{Result, SimError};

/// Control surface deflections [rad]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSurfaces {
    pub elevator: f64,
    pub aileron: f64,
}

impl ControlSurfaces {
    pub fn new(elevator: f64, aileron: f64) -> Self {
        Self { elevator, aileron }
    }
}

/// Commands for one derivative evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub surfaces: ControlSurfaces,

    /// One command in [0, 1] per thruster, in vehicle order
    pub throttle: Vec<f64>,
}

impl ControlInputs {
    pub fn new(surfaces: ControlSurfaces, throttle: Vec<f64>) -> Self {
        Self { surfaces, throttle }
    }

    /// The same throttle command on `n_thrusters` channels.
    pub fn uniform(surfaces: ControlSurfaces, throttle: f64, n_thrusters: usize) -> Self {
        Self {
            surfaces,
            throttle: vec![throttle; n_thrusters],
        }
    }

    /// Command for thruster `index`, clamped to [0, 1]. Missing channels command 0.
    pub fn throttle_command(&self, index: usize) -> f64 {
        self.throttle
            .get(index)
            .copied()
            .filter(|c| !c.is_nan())
            .map_or(0.0, |c| c.clamp(0.0, 1.0))
    }

    /// Check the commands against a vehicle before a run.
    pub fn validate(&self, params: &VehicleParameters) -> Result<()> {
        if self.throttle.len() != params.thrusters().len() {
            return Err(SimError::InvalidControl(format!(
                "{} throttle channels for {} thrusters",
                self.throttle.len(),
                params.thrusters().len()
            )));
        }
        if let Some(bad) = self.throttle.iter().find(|c| !c.is_finite()) {
            return Err(SimError::InvalidControl(format!("non-finite throttle {}", bad)));
        }
        if !self.surfaces.elevator.is_finite() || !self.surfaces.aileron.is_finite() {
            return Err(SimError::InvalidControl("non-finite surface deflection".into()));
        }
        Ok(())
    }
}
