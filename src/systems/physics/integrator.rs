use super::dynamics::VehicleModel;
use crate::components::{ControlInputs, StateVector};
use crate::utils::{Result, SimError};

/// Classic fixed-step fourth-order Runge-Kutta.
///
/// The quaternion is renormalised after every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4 {
    pub dt: f64,
}

impl Rk4 {
    pub fn new(dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "time step must be positive, got {}",
                dt
            )));
        }
        Ok(Self { dt })
    }

    pub fn step(
        &self,
        model: &VehicleModel<'_>,
        time: f64,
        state: &StateVector,
        controls: &ControlInputs,
    ) -> Result<StateVector> {
        let dt = self.dt;

        let k1 = model.derivative(time, state, controls)?;
        let k2 = model.derivative(time + 0.5 * dt, &state.add_scaled(&k1, 0.5 * dt), controls)?;
        let k3 = model.derivative(time + 0.5 * dt, &state.add_scaled(&k2, 0.5 * dt), controls)?;
        let k4 = model.derivative(time + dt, &state.add_scaled(&k3, dt), controls)?;

        let mut next = state
            .add_scaled(&k1, dt / 6.0)
            .add_scaled(&k2, dt / 3.0)
            .add_scaled(&k3, dt / 3.0)
            .add_scaled(&k4, dt / 6.0);
        next.renormalize();
        Ok(next)
    }

    /// Advance `steps` steps from `time` under constant controls.
    pub fn propagate(
        &self,
        model: &VehicleModel<'_>,
        time: f64,
        state: &StateVector,
        controls: &ControlInputs,
        steps: usize,
    ) -> Result<StateVector> {
        let mut current = state.clone();
        for i in 0..steps {
            current = self.step(model, time + i as f64 * self.dt, &current, controls)?;
        }
        Ok(current)
    }
}
