mod air_data;
mod force_calculator;

pub use air_data::{resolve_air_data, AirData};
pub use force_calculator::{aerodynamic_forces_moments, nondimensional_rates};
