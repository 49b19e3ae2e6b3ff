use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::state::TrimVariable;

/// Search box for the trim variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimBounds {
    /// Angle of attack (rad)
    pub alpha_range: (f64, f64),
    pub throttle_range: (f64, f64),
    /// Elevator deflection (rad)
    pub elevator_range: (f64, f64),
}

impl Default for TrimBounds {
    fn default() -> Self {
        Self {
            alpha_range: (-2.0 * PI / 180.0, 14.0 * PI / 180.0),
            throttle_range: (0.0, 1.0),
            elevator_range: (-29.0 * PI / 180.0, 24.0 * PI / 180.0),
        }
    }
}

impl TrimBounds {
    pub fn range(&self, variable: TrimVariable) -> (f64, f64) {
        match variable {
            TrimVariable::Alpha => self.alpha_range,
            TrimVariable::Throttle => self.throttle_range,
            TrimVariable::Elevator => self.elevator_range,
        }
    }

    /// Parameter vector `[alpha, throttle, elevator]` projected into the box.
    ///
    /// An inverted range yields its `max` value.
    pub fn clamp(&self, param: &[f64; 3]) -> [f64; 3] {
        let mut clamped = [0.0; 3];
        for (slot, variable) in clamped.iter_mut().zip(TrimVariable::ALL) {
            let (min, max) = self.range(variable);
            *slot = param[variable.index()].max(min).min(max);
        }
        clamped
    }

    pub fn is_valid(&self) -> bool {
        TrimVariable::ALL.iter().all(|v| {
            let (min, max) = self.range(*v);
            min.is_finite() && max.is_finite() && min < max
        })
    }
}

/// Configuration for the trim solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSolverConfig {
    pub bounds: TrimBounds,
    /// Starting point `[alpha, throttle, elevator]`
    pub initial_guess: [f64; 3],
    /// A trim is accepted when its cost is at or below this value
    pub acceptance_tolerance: f64,
    /// Cost at which the optimiser stops early
    pub target_cost: f64,
    /// Iteration cap for the direct search stage
    pub max_iterations: u64,
    /// Iteration cap for the gradient refinement stage
    pub max_gradient_iterations: u64,
    /// Whether to refine the direct search result with L-BFGS
    pub use_gradient_refinement: bool,
    /// Weight of the quadratic penalty for leaving the bounds
    pub bound_penalty_weight: f64,
    /// Fraction of a variable's range within which it counts as on the bound
    pub bound_margin: f64,
    /// Thrusters driven by the trim throttle, all when `None`
    pub throttle_thrusters: Option<Vec<String>>,
}

impl Default for TrimSolverConfig {
    fn default() -> Self {
        Self {
            bounds: TrimBounds::default(),
            initial_guess: [5.0 * PI / 180.0, 0.7, 0.0],
            acceptance_tolerance: 1e-6,
            target_cost: 1e-10,
            max_iterations: 1000,
            max_gradient_iterations: 200,
            use_gradient_refinement: true,
            bound_penalty_weight: 1e3,
            bound_margin: 1e-4,
            throttle_thrusters: None,
        }
    }
}

impl TrimSolverConfig {
    /// Restrict the trim throttle to the named thrusters.
    pub fn with_throttle_thrusters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.throttle_thrusters = Some(names.into_iter().map(Into::into).collect());
        self
    }
}
