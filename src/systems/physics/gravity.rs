use nalgebra::{Quaternion, Vector3};

use crate::utils::normalized_attitude;

/// Weight in body axes: `m * R(q)^-1 (0, 0, g)`.
///
/// A degenerate attitude gives zero force.
pub fn gravity_force(mass: f64, gravity: f64, attitude: &Quaternion<f64>) -> Vector3<f64> {
    match normalized_attitude(attitude) {
        Some(attitude) => attitude.inverse_transform_vector(&Vector3::new(0.0, 0.0, mass * gravity)),
        None => Vector3::zeros(),
    }
}
