use nalgebra::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::normalized_attitude;

/// Flow angles and airspeed relative to the air mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Angle of attack (rad)
    pub alpha: f64,
    /// Sideslip angle (rad)
    pub beta: f64,
    /// Air-relative velocity in body axes (m/s)
    pub relative_velocity: Vector3<f64>,
}

impl AirData {
    pub fn dynamic_pressure(&self, density: f64) -> f64 {
        0.5 * density * self.airspeed * self.airspeed
    }

    pub fn mach(&self, speed_of_sound: f64) -> f64 {
        self.airspeed / speed_of_sound
    }
}

/// Resolve airspeed, alpha and beta from the body velocity and an NED wind.
///
/// The wind is rotated into body axes with the inverse attitude. A degenerate
/// attitude yields all-zero air data.
pub fn resolve_air_data(
    velocity_body: &Vector3<f64>,
    wind_ned: &Vector3<f64>,
    attitude: &Quaternion<f64>,
) -> AirData {
    let Some(attitude) = normalized_attitude(attitude) else {
        return AirData::default();
    };

    let wind_body = attitude.inverse_transform_vector(wind_ned);
    let relative_velocity = velocity_body - wind_body;
    let airspeed = relative_velocity.norm();

    let alpha = relative_velocity.z.atan2(relative_velocity.x);
    let beta = if airspeed > 0.0 {
        (relative_velocity.y / airspeed).clamp(-1.0, 1.0).asin()
    } else {
        0.0
    };

    AirData {
        airspeed,
        alpha,
        beta,
        relative_velocity,
    }
}
