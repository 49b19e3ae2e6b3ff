use nalgebra::Vector3;

use crate::components::{ControlInputs, ForceMoment, VehicleParameters};

/// First-order lag of every thruster towards its command.
///
/// `ds_i/dt = (cmd_i - s_i) / tau_i` with the command clamped to [0, 1].
/// Missing state entries are read as zero.
pub fn thruster_lag_derivative(
    lag: &[f64],
    controls: &ControlInputs,
    params: &VehicleParameters,
) -> Vec<f64> {
    params
        .thrusters()
        .iter()
        .enumerate()
        .map(|(i, thruster)| {
            let state = lag.get(i).copied().unwrap_or(0.0);
            (controls.throttle_command(i) - state) / thruster.time_constant
        })
        .collect()
}

/// Body-frame thrust vector of each thruster for the given lag states.
pub fn thruster_forces(lag: &[f64], params: &VehicleParameters) -> Vec<Vector3<f64>> {
    params
        .thrusters()
        .iter()
        .enumerate()
        .map(|(i, thruster)| {
            let thrust = thruster.max_thrust * lag.get(i).copied().unwrap_or(0.0);
            thruster.rotation * Vector3::new(thrust, 0.0, 0.0)
        })
        .collect()
}

/// Total thrust and its moment about the cg.
pub fn propulsive_forces_moments(lag: &[f64], params: &VehicleParameters) -> ForceMoment {
    params
        .thrusters()
        .iter()
        .zip(thruster_forces(lag, params))
        .fold(ForceMoment::zeros(), |acc, (thruster, force)| {
            let arm = thruster.position - params.cg();
            acc + ForceMoment::new(force, arm.cross(&force))
        })
}
