mod config;
mod state;

pub use config::{TrimBounds, TrimSolverConfig};
pub use state::{
    TrimCondition, TrimRequest, TrimResiduals, TrimResult, TrimStatus, TrimVariable,
};
