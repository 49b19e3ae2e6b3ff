mod powerplant;

pub use powerplant::{propulsive_forces_moments, thruster_forces, thruster_lag_derivative};
