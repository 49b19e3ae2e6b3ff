pub mod aerodynamics;
pub mod controls;
pub mod physics;
pub mod state;
pub mod table;
pub mod trim;
pub mod vehicle;

pub use aerodynamics::{
    AeroCoefficients, AeroLookup, AeroQuery, DatcomTableModel, StabilityDerivatives,
};
pub use controls::{ControlInputs, ControlSurfaces};
pub use physics::{ForceBreakdown, ForceCategory, ForceMoment};
pub use state::{StateDerivative, StateVector};
pub use table::{Axis, Column, LookupTable, OutOfBounds, TableData};
pub use trim::{
    TrimBounds, TrimCondition, TrimRequest, TrimResiduals, TrimResult, TrimSolverConfig,
    TrimStatus, TrimVariable,
};
pub use vehicle::{
    AeroReference, Atmosphere, MassProperties, MassPropsLookup, TableMassModel, Thruster,
    VehicleConfig, VehicleParameters,
};
