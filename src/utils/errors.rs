use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Inertia tensor is not invertible: {0}")]
    SingularInertia(String),

    #[error("Invalid control input: {0}")]
    InvalidControl(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("Lookup on axis '{axis}' out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        axis: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown output channel: {0}")]
    UnknownChannel(String),

    #[error("Optimizer error: {0}")]
    Optimizer(String),

    #[error("Trim did not converge: cost {cost:.3e} (alpha={alpha:.4}, throttle={throttle:.4}, elevator={elevator:.4})")]
    TrimNotConverged {
        cost: f64,
        alpha: f64,
        throttle: f64,
        elevator: f64,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
