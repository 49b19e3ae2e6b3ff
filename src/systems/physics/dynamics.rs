use nalgebra::{Matrix3, Quaternion, Vector3};

use super::force_calculator::aggregate_forces_moments;
use super::gravity::gravity_force;
use crate::components::{
    AeroLookup, ControlInputs, ForceBreakdown, ForceMoment, StateDerivative, StateVector,
    VehicleParameters,
};
use crate::systems::aerodynamics::{aerodynamic_forces_moments, resolve_air_data, AirData};
use crate::systems::propulsion::{propulsive_forces_moments, thruster_lag_derivative};
use crate::utils::{normalized_attitude, Result, SimError};

/// Body-axis acceleration: `F/m - omega x v`.
pub fn translational_dynamics(
    force: &Vector3<f64>,
    mass: f64,
    velocity: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
) -> Vector3<f64> {
    force / mass - angular_velocity.cross(velocity)
}

/// NED position rate `R(q) v`, zero for a degenerate attitude.
pub fn translational_kinematics(velocity: &Vector3<f64>, attitude: &Quaternion<f64>) -> Vector3<f64> {
    normalized_attitude(attitude).map_or_else(Vector3::zeros, |q| q * velocity)
}

/// Euler's equation `J^-1 (M - omega x J omega)`.
pub fn rotational_dynamics(
    moment: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
    inertia: &Matrix3<f64>,
    inertia_inv: &Matrix3<f64>,
) -> Vector3<f64> {
    inertia_inv * (moment - angular_velocity.cross(&(inertia * angular_velocity)))
}

/// Attitude rate `0.5 * Omega(omega) * q` for a real-first quaternion.
pub fn quaternion_derivative(attitude: &Quaternion<f64>, angular_velocity: &Vector3<f64>) -> Quaternion<f64> {
    let (p, q, r) = (angular_velocity.x, angular_velocity.y, angular_velocity.z);
    let (q0, q1, q2, q3) = (attitude.w, attitude.i, attitude.j, attitude.k);

    Quaternion::new(
        0.5 * (-p * q1 - q * q2 - r * q3),
        0.5 * (p * q0 + r * q2 - q * q3),
        0.5 * (q * q0 - r * q1 + p * q3),
        0.5 * (r * q0 + q * q1 - p * q2),
    )
}

/// Everything produced by one derivative evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub derivative: StateDerivative,
    pub air_data: AirData,
    pub forces: ForceBreakdown,
}

/// A vehicle, its aerodynamic model and the ambient wind.
///
/// Evaluation is pure: the model holds no mutable state and can be shared
/// between threads.
#[derive(Clone, Copy)]
pub struct VehicleModel<'a> {
    params: &'a VehicleParameters,
    aero: &'a dyn AeroLookup,
    wind: Vector3<f64>,
}

impl<'a> VehicleModel<'a> {
    pub fn new(params: &'a VehicleParameters, aero: &'a dyn AeroLookup) -> Self {
        Self {
            params,
            aero,
            wind: Vector3::zeros(),
        }
    }

    /// Constant wind in NED (m/s).
    pub fn with_wind(mut self, wind_ned: Vector3<f64>) -> Self {
        self.wind = wind_ned;
        self
    }

    pub fn params(&self) -> &'a VehicleParameters {
        self.params
    }

    pub fn wind(&self) -> &Vector3<f64> {
        &self.wind
    }

    /// State derivative together with the air data and loads behind it.
    pub fn evaluate(&self, _time: f64, state: &StateVector, controls: &ControlInputs) -> Result<Evaluation> {
        let params = self.params;
        if state.thrusters.len() != params.thrusters().len() {
            return Err(SimError::StateError(format!(
                "state carries {} thruster lag states, '{}' has {} thrusters",
                state.thrusters.len(),
                params.name(),
                params.thrusters().len()
            )));
        }

        let air_data = resolve_air_data(&state.velocity, &self.wind, &state.attitude);
        let aerodynamic = aerodynamic_forces_moments(
            &air_data,
            &state.angular_velocity,
            &controls.surfaces,
            params,
            self.aero,
        )?;
        let propulsive = propulsive_forces_moments(&state.thrusters, params);
        let gravitational = ForceMoment::force_only(gravity_force(
            params.mass(),
            params.gravity(),
            &state.attitude,
        ));
        let forces = aggregate_forces_moments(aerodynamic, propulsive, gravitational);

        let derivative = StateDerivative {
            position: translational_kinematics(&state.velocity, &state.attitude),
            velocity: translational_dynamics(
                &forces.total.force,
                params.mass(),
                &state.velocity,
                &state.angular_velocity,
            ),
            attitude: quaternion_derivative(&state.attitude, &state.angular_velocity),
            angular_velocity: rotational_dynamics(
                &forces.total.moment,
                &state.angular_velocity,
                params.inertia(),
                params.inertia_inv(),
            ),
            thrusters: thruster_lag_derivative(&state.thrusters, controls, params),
        };

        Ok(Evaluation {
            derivative,
            air_data,
            forces,
        })
    }

    pub fn derivative(&self, time: f64, state: &StateVector, controls: &ControlInputs) -> Result<StateDerivative> {
        Ok(self.evaluate(time, state, controls)?.derivative)
    }

    /// Derivative on the flat layout, for external integrators.
    pub fn derivative_flat(&self, time: f64, state: &[f64], controls: &ControlInputs) -> Result<Vec<f64>> {
        let state = StateVector::from_slice(state, self.params.thrusters().len())?;
        Ok(self.derivative(time, &state, controls)?.to_vec())
    }
}

/// Derivative of `state` in calm air.
pub fn derivative(
    time: f64,
    state: &StateVector,
    controls: &ControlInputs,
    params: &VehicleParameters,
    aero: &dyn AeroLookup,
) -> Result<StateDerivative> {
    VehicleModel::new(params, aero).derivative(time, state, controls)
}
