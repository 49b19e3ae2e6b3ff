use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::deg_to_rad;

/// A single thrust producer with a first-order response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thruster {
    /// Name of the thruster, used to select trim channels
    pub name: String,
    /// Thrust application point in body axes (m)
    pub position: Vector3<f64>,
    /// Rotates the thrust-frame +x axis into the body frame
    pub rotation: UnitQuaternion<f64>,
    /// Lag time constant (s)
    pub time_constant: f64,
    /// Thrust at full lag state (N)
    pub max_thrust: f64,
}

impl Thruster {
    pub fn new(
        name: impl Into<String>,
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        time_constant: f64,
        max_thrust: f64,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            rotation,
            time_constant,
            max_thrust,
        }
    }

    /// Thruster pointing along body +x.
    pub fn forward(name: impl Into<String>, position: Vector3<f64>, time_constant: f64, max_thrust: f64) -> Self {
        Self::new(name, position, UnitQuaternion::identity(), time_constant, max_thrust)
    }

    /// Thruster whose thrust line is given by roll/pitch/yaw in degrees.
    pub fn from_orientation_deg(
        name: impl Into<String>,
        position: Vector3<f64>,
        orientation: Vector3<f64>,
        time_constant: f64,
        max_thrust: f64,
    ) -> Self {
        let rotation = UnitQuaternion::from_euler_angles(
            deg_to_rad(orientation.x),
            deg_to_rad(orientation.y),
            deg_to_rad(orientation.z),
        );
        Self::new(name, position, rotation, time_constant, max_thrust)
    }

    /// Unit thrust direction in body axes.
    pub fn direction(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }
}
