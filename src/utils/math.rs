use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::f64::consts::PI;

use super::constants::MIN_QUATERNION_NORM;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Normalise a raw attitude quaternion (real part first, body to NED).
///
/// Returns `None` for a zero-norm or non-finite quaternion. Integrators can
/// transiently probe such states and callers must treat them as degenerate
/// instead of dividing by the norm.
pub fn normalized_attitude(q: &Quaternion<f64>) -> Option<UnitQuaternion<f64>> {
    if !q.coords.iter().all(|c| c.is_finite()) {
        return None;
    }
    UnitQuaternion::try_new(*q, MIN_QUATERNION_NORM)
}

/// Build a body-to-NED quaternion from 3-2-1 Euler angles.
///
/// `R(q) = Rz(psi) * Ry(theta) * Rx(phi)`.
pub fn quaternion_from_euler(phi: f64, theta: f64, psi: f64) -> Quaternion<f64> {
    UnitQuaternion::from_euler_angles(phi, theta, psi).into_inner()
}

/// Recover (phi, theta, psi) from a body-to-NED quaternion.
///
/// A degenerate quaternion yields zero angles.
pub fn euler_from_quaternion(q: &Quaternion<f64>) -> Vector3<f64> {
    match normalized_attitude(q) {
        Some(attitude) => {
            let (phi, theta, psi) = attitude.euler_angles();
            Vector3::new(phi, theta, psi)
        }
        None => Vector3::zeros(),
    }
}

/// Quaternion for a pure pitch rotation: `(cos(theta/2), 0, sin(theta/2), 0)`.
pub fn pitch_quaternion(theta: f64) -> Quaternion<f64> {
    let half = 0.5 * theta;
    Quaternion::new(half.cos(), 0.0, half.sin(), 0.0)
}

/// Express a moment acting about `from` as a moment about `to`.
///
/// `M_to = M_from + (from - to) x F`
#[inline]
pub fn moment_transfer(
    moment: &Vector3<f64>,
    force: &Vector3<f64>,
    from: &Vector3<f64>,
    to: &Vector3<f64>,
) -> Vector3<f64> {
    moment + (from - to).cross(force)
}
