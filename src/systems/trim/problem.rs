use argmin::core::{CostFunction, Error as ArgminError, Gradient};

use crate::components::{TrimBounds, TrimCondition, TrimRequest, TrimResiduals, TrimVariable};
use crate::systems::physics::VehicleModel;
use crate::utils::{Result, SimError};

const GRADIENT_STEP: f64 = 1e-6;

/// Level-flight trim cost for one request.
///
/// The model is always evaluated at the parameters projected into the bounds;
/// leaving the box only adds a quadratic penalty.
#[derive(Clone)]
pub struct TrimProblem<'a> {
    pub model: VehicleModel<'a>,
    pub request: TrimRequest,
    pub bounds: TrimBounds,
    /// Thrusters driven by the trim throttle, in vehicle order
    pub driven: &'a [bool],
    pub penalty_weight: f64,
}

/// Quadratic penalty for `value` outside `range`.
pub fn calculate_constraint_penalty(value: f64, range: (f64, f64), weight: f64) -> f64 {
    let (min, max) = range;
    let below_min = if value < min { (min - value).powi(2) } else { 0.0 };
    let above_max = if value > max { (value - max).powi(2) } else { 0.0 };
    weight * (below_min + above_max)
}

/// `[alpha, throttle, elevator]` from an optimiser parameter vector.
fn trim_vector(param: &[f64]) -> Result<[f64; 3]> {
    param.try_into().map_err(|_| {
        SimError::StateError(format!(
            "trim parameters are [alpha, throttle, elevator], got {} values",
            param.len()
        ))
    })
}

impl TrimProblem<'_> {
    /// Trim condition at the projected parameters.
    pub fn condition(&self, param: &[f64]) -> Result<TrimCondition> {
        let param = trim_vector(param)?;
        Ok(TrimCondition::from_vector(
            &self.bounds.clamp(&param),
            self.request.airspeed,
        ))
    }

    /// `(u_dot, w_dot, q_dot)` at the projected parameters.
    pub fn residuals(&self, param: &[f64]) -> Result<TrimResiduals> {
        let condition = self.condition(param)?;
        let controls = condition.controls(self.driven);
        let state = condition.state(self.request.altitude, &controls);
        let derivative = self.model.derivative(0.0, &state, &controls)?;

        Ok(TrimResiduals {
            u_dot: derivative.velocity.x,
            w_dot: derivative.velocity.z,
            q_dot: derivative.angular_velocity.y,
        })
    }

    fn penalty(&self, param: &[f64; 3]) -> f64 {
        TrimVariable::ALL
            .iter()
            .map(|v| {
                calculate_constraint_penalty(
                    param[v.index()],
                    self.bounds.range(*v),
                    self.penalty_weight,
                )
            })
            .sum()
    }
}

impl CostFunction for TrimProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> std::result::Result<Self::Output, ArgminError> {
        let vector = trim_vector(param)?;
        let cost = self.residuals(param)?.cost() + self.penalty(&vector);
        // Keep the simplex ordering well defined
        Ok(if cost.is_nan() { f64::INFINITY } else { cost })
    }
}

impl Gradient for TrimProblem<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, param: &Self::Param) -> std::result::Result<Self::Gradient, ArgminError> {
        let mut grad = vec![0.0; param.len()];

        // Central differences
        for (i, slot) in grad.iter_mut().enumerate() {
            let mut param_plus = param.clone();
            let mut param_minus = param.clone();
            param_plus[i] += GRADIENT_STEP;
            param_minus[i] -= GRADIENT_STEP;

            let f_plus = self.cost(&param_plus)?;
            let f_minus = self.cost(&param_minus)?;

            if f_plus.is_finite() && f_minus.is_finite() {
                *slot = (f_plus - f_minus) / (2.0 * GRADIENT_STEP);
            }
        }

        Ok(grad)
    }
}
