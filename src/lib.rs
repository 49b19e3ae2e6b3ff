pub mod components;
pub mod systems;
pub mod utils;

pub use components::{
    ControlInputs, ControlSurfaces, StateDerivative, StateVector, TrimRequest, TrimResult,
    TrimSolverConfig, VehicleConfig, VehicleParameters,
};
pub use systems::{OutputChannel, Rk4, SimOutputs, TrimSolver, VehicleModel};
pub use utils::{Result, SimError};
