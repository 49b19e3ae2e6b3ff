pub mod aerodynamics;
pub mod outputs;
pub mod physics;
pub mod propulsion;
pub mod trim;

pub use aerodynamics::{aerodynamic_forces_moments, resolve_air_data, AirData};
pub use outputs::{OutputChannel, SimOutputs};
pub use physics::{
    aggregate_forces_moments, derivative, gravity_force, Evaluation, Rk4, VehicleModel,
};
pub use propulsion::{propulsive_forces_moments, thruster_lag_derivative};
pub use trim::{TrimProblem, TrimSolver};
