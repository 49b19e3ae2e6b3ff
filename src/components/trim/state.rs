use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::controls::{ControlInputs, ControlSurfaces};
use crate::components::state::StateVector;
use crate::utils::{pitch_quaternion, Result, SimError};

/// Steady, wings-level flight condition to trim for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRequest {
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Altitude above the NED origin (m)
    #[serde(default)]
    pub altitude: f64,
}

impl TrimRequest {
    pub fn new(airspeed: f64) -> Self {
        Self {
            airspeed,
            altitude: 0.0,
        }
    }

    pub fn at_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }
}

/// Decision variables of the longitudinal trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimVariable {
    Alpha,
    Throttle,
    Elevator,
}

impl TrimVariable {
    pub const ALL: [TrimVariable; 3] = [Self::Alpha, Self::Throttle, Self::Elevator];

    /// Position in the parameter vector.
    pub fn index(self) -> usize {
        match self {
            Self::Alpha => 0,
            Self::Throttle => 1,
            Self::Elevator => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Throttle => "throttle",
            Self::Elevator => "elevator",
        }
    }
}

impl fmt::Display for TrimVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim variables together with the state they imply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimCondition {
    pub alpha: f64,
    pub throttle: f64,
    pub elevator: f64,
    /// Pitch attitude, equal to alpha in level flight
    pub theta: f64,
    /// Body-axis velocity components
    pub u0: f64,
    pub w0: f64,
}

impl TrimCondition {
    pub fn new(alpha: f64, throttle: f64, elevator: f64, airspeed: f64) -> Self {
        let (sa, ca) = alpha.sin_cos();
        Self {
            alpha,
            throttle,
            elevator,
            theta: alpha,
            u0: airspeed * ca,
            w0: airspeed * sa,
        }
    }

    pub fn from_vector(param: &[f64; 3], airspeed: f64) -> Self {
        Self::new(param[0], param[1], param[2], airspeed)
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![self.alpha, self.throttle, self.elevator]
    }

    /// Per-thruster commands: the trim throttle on driven channels, zero elsewhere.
    pub fn controls(&self, driven: &[bool]) -> ControlInputs {
        ControlInputs::new(
            ControlSurfaces::new(self.elevator, 0.0),
            driven
                .iter()
                .map(|on| if *on { self.throttle } else { 0.0 })
                .collect(),
        )
    }

    /// Level-flight state with the lag states settled on the commands.
    pub fn state(&self, altitude: f64, controls: &ControlInputs) -> StateVector {
        StateVector {
            position: Vector3::new(0.0, 0.0, -altitude),
            velocity: Vector3::new(self.u0, 0.0, self.w0),
            attitude: pitch_quaternion(self.theta),
            angular_velocity: Vector3::zeros(),
            thrusters: controls.throttle.clone(),
        }
    }
}

/// Longitudinal accelerations left at the trim point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimResiduals {
    /// Forward acceleration (m/s²)
    pub u_dot: f64,
    /// Vertical acceleration (m/s²)
    pub w_dot: f64,
    /// Pitch acceleration (rad/s²)
    pub q_dot: f64,
}

impl TrimResiduals {
    pub fn cost(&self) -> f64 {
        self.u_dot.powi(2) + self.w_dot.powi(2) + self.q_dot.powi(2)
    }

    pub fn max_abs(&self) -> f64 {
        self.u_dot.abs().max(self.w_dot.abs()).max(self.q_dot.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrimStatus {
    Converged,
    /// Cost stayed above the acceptance tolerance
    ResidualAboveTolerance,
    /// Best point sits on the bounds of these variables
    AtBound(Vec<TrimVariable>),
}

/// Results from the trim calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimResult {
    pub request: TrimRequest,
    pub condition: TrimCondition,
    pub controls: ControlInputs,
    pub converged: bool,
    pub cost: f64,
    pub residuals: TrimResiduals,
    pub status: TrimStatus,
    pub iterations: u64,
}

impl TrimResult {
    /// Trimmed state for starting a simulation.
    pub fn initial_state(&self) -> StateVector {
        self.condition.state(self.request.altitude, &self.controls)
    }

    pub fn controls(&self) -> ControlInputs {
        self.controls.clone()
    }

    /// Fail unless the trim converged.
    pub fn into_converged(self) -> Result<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(SimError::TrimNotConverged {
                cost: self.cost,
                alpha: self.condition.alpha,
                throttle: self.condition.throttle,
                elevator: self.condition.elevator,
            })
        }
    }
}
