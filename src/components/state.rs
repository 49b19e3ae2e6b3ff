use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{euler_from_quaternion, normalized_attitude, quaternion_from_euler, Result, SimError};

/// Number of rigid-body entries ahead of the thruster lag states in the flat layout.
pub const RIGID_BODY_STATES: usize = 13;

/// Full vehicle state.
///
/// Flat layout: `[x, y, z, u, v, w, q0, q1, q2, q3, p, q, r, s_1 .. s_n]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Position in NED [m]
    pub position: Vector3<f64>,

    /// Body-frame velocity (u, v, w) [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion, real part first, rotating body vectors into NED.
    /// Kept raw so an integrator can hand in a non-unit value.
    pub attitude: Quaternion<f64>,

    /// Body rates (p, q, r) [rad/s]
    pub angular_velocity: Vector3<f64>,

    /// Per-thruster lag state in [0, 1]
    pub thrusters: Vec<f64>,
}

impl StateVector {
    /// Vehicle at rest at the NED origin with identity attitude.
    pub fn new(n_thrusters: usize) -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: Quaternion::identity(),
            angular_velocity: Vector3::zeros(),
            thrusters: vec![0.0; n_thrusters],
        }
    }

    /// Vehicle at rest with attitude given by 3-2-1 Euler angles.
    pub fn with_euler(n_thrusters: usize, phi: f64, theta: f64, psi: f64) -> Self {
        Self {
            attitude: quaternion_from_euler(phi, theta, psi),
            ..Self::new(n_thrusters)
        }
    }

    pub fn n_thrusters(&self) -> usize {
        self.thrusters.len()
    }

    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    /// Unit attitude, or `None` when the stored quaternion is degenerate.
    pub fn unit_attitude(&self) -> Option<UnitQuaternion<f64>> {
        normalized_attitude(&self.attitude)
    }

    /// (phi, theta, psi), zero for a degenerate attitude.
    pub fn euler_angles(&self) -> Vector3<f64> {
        euler_from_quaternion(&self.attitude)
    }

    /// Rescale the attitude to unit norm. A degenerate quaternion is left as is.
    pub fn renormalize(&mut self) {
        if let Some(unit) = self.unit_attitude() {
            self.attitude = unit.into_inner();
        }
    }

    /// Length of the flat layout.
    pub fn flat_len(&self) -> usize {
        RIGID_BODY_STATES + self.thrusters.len()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.flat_len());
        flat.extend_from_slice(self.position.as_slice());
        flat.extend_from_slice(self.velocity.as_slice());
        flat.extend_from_slice(&[
            self.attitude.w,
            self.attitude.i,
            self.attitude.j,
            self.attitude.k,
        ]);
        flat.extend_from_slice(self.angular_velocity.as_slice());
        flat.extend_from_slice(&self.thrusters);
        flat
    }

    pub fn from_slice(flat: &[f64], n_thrusters: usize) -> Result<Self> {
        let expected = RIGID_BODY_STATES + n_thrusters;
        if flat.len() != expected {
            return Err(SimError::StateError(format!(
                "flat state has {} entries, expected {} for {} thrusters",
                flat.len(),
                expected,
                n_thrusters
            )));
        }

        Ok(Self {
            position: Vector3::new(flat[0], flat[1], flat[2]),
            velocity: Vector3::new(flat[3], flat[4], flat[5]),
            attitude: Quaternion::new(flat[6], flat[7], flat[8], flat[9]),
            angular_velocity: Vector3::new(flat[10], flat[11], flat[12]),
            thrusters: flat[RIGID_BODY_STATES..].to_vec(),
        })
    }

    /// `self + scale * derivative`, used by the stepper stages.
    pub fn add_scaled(&self, derivative: &StateDerivative, scale: f64) -> Self {
        Self {
            position: self.position + derivative.position * scale,
            velocity: self.velocity + derivative.velocity * scale,
            attitude: self.attitude + derivative.attitude * scale,
            angular_velocity: self.angular_velocity + derivative.angular_velocity * scale,
            thrusters: self
                .thrusters
                .iter()
                .zip(&derivative.thrusters)
                .map(|(s, ds)| s + ds * scale)
                .collect(),
        }
    }
}

/// Time derivative of a [`StateVector`], same layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDerivative {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: Quaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub thrusters: Vec<f64>,
}

impl StateDerivative {
    pub fn zeros(n_thrusters: usize) -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: Quaternion::new(0.0, 0.0, 0.0, 0.0),
            angular_velocity: Vector3::zeros(),
            thrusters: vec![0.0; n_thrusters],
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(RIGID_BODY_STATES + self.thrusters.len());
        flat.extend_from_slice(self.position.as_slice());
        flat.extend_from_slice(self.velocity.as_slice());
        flat.extend_from_slice(&[
            self.attitude.w,
            self.attitude.i,
            self.attitude.j,
            self.attitude.k,
        ]);
        flat.extend_from_slice(self.angular_velocity.as_slice());
        flat.extend_from_slice(&self.thrusters);
        flat
    }
}
