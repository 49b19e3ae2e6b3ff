mod dynamics;
mod force_calculator;
mod gravity;
mod integrator;

pub use dynamics::{
    derivative, quaternion_derivative, rotational_dynamics, translational_dynamics,
    translational_kinematics, Evaluation, VehicleModel,
};
pub use force_calculator::aggregate_forces_moments;
pub use gravity::gravity_force;
pub use integrator::Rk4;
