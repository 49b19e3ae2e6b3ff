use argmin::{
    core::{Executor, State},
    solver::{linesearch::MoreThuenteLineSearch, neldermead::NelderMead, quasinewton::LBFGS},
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::problem::TrimProblem;
use crate::components::{
    TrimRequest, TrimResult, TrimSolverConfig, TrimStatus, TrimVariable, VehicleParameters,
};
use crate::systems::physics::VehicleModel;
use crate::utils::{rad_to_deg, Result, SimError};

/// Spread of vertex costs at which the simplex is considered collapsed.
const SIMPLEX_SD_TOLERANCE: f64 = 1e-14;

/// Initial simplex edge as a fraction of each variable's range.
const SIMPLEX_EDGE: f64 = 0.1;

/// Best point of one optimiser stage.
struct StageResult {
    param: Vec<f64>,
    cost: f64,
    iterations: u64,
}

/// Longitudinal trim of a vehicle model.
///
/// A Nelder-Mead search over `(alpha, throttle, elevator)` is refined with
/// L-BFGS. The solver is read-only, so one instance can serve many requests.
pub struct TrimSolver<'a> {
    model: VehicleModel<'a>,
    config: TrimSolverConfig,
    driven: Vec<bool>,
}

impl<'a> TrimSolver<'a> {
    pub fn new(model: VehicleModel<'a>, config: TrimSolverConfig) -> Result<Self> {
        if !config.bounds.is_valid() {
            return Err(SimError::InvalidConfig(format!(
                "trim bounds must be finite and non-empty: {:?}",
                config.bounds
            )));
        }
        if !config.initial_guess.iter().all(|v| v.is_finite()) {
            return Err(SimError::InvalidConfig("trim initial guess must be finite".into()));
        }
        if !(config.acceptance_tolerance > 0.0) || !(config.bound_penalty_weight > 0.0) {
            return Err(SimError::InvalidConfig(
                "trim tolerance and penalty weight must be positive".into(),
            ));
        }

        let driven = driven_thrusters(model.params(), config.throttle_thrusters.as_deref())?;

        Ok(Self {
            model,
            config,
            driven,
        })
    }

    pub fn config(&self) -> &TrimSolverConfig {
        &self.config
    }

    /// Trim for steady, wings-level flight.
    ///
    /// Always returns the best point found; check `converged` or call
    /// [`TrimResult::into_converged`].
    pub fn solve(&self, request: &TrimRequest) -> Result<TrimResult> {
        if !request.airspeed.is_finite() || request.airspeed <= 0.0 || !request.altitude.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "trim needs a positive airspeed and finite altitude, got {:?}",
                request
            )));
        }

        let problem = TrimProblem {
            model: self.model,
            request: *request,
            bounds: self.config.bounds,
            driven: &self.driven,
            penalty_weight: self.config.bound_penalty_weight,
        };

        let initial = self.config.bounds.clamp(&self.config.initial_guess).to_vec();
        let mut best = self.direct_search(&problem, &initial)?;
        let mut iterations = best.iterations;
        debug!(
            "Direct search finished after {} iterations, cost {:.3e}",
            best.iterations, best.cost
        );

        if self.config.use_gradient_refinement && best.cost > self.config.target_cost {
            debug!("Switching to gradient refinement at cost {:.3e}", best.cost);
            match self.gradient_refinement(&problem, &best.param) {
                Ok(refined) => {
                    iterations += refined.iterations;
                    if refined.cost < best.cost {
                        best = StageResult {
                            iterations,
                            ..refined
                        };
                    }
                }
                Err(err) => warn!("Gradient refinement failed, keeping direct search result: {}", err),
            }
        }

        let condition = problem.condition(&best.param)?;
        let controls = condition.controls(&self.driven);
        let residuals = problem.residuals(&best.param)?;
        let cost = residuals.cost();

        let at_bound = self.variables_at_bound(&condition.to_vector());
        let status = if !at_bound.is_empty() {
            TrimStatus::AtBound(at_bound)
        } else if cost > self.config.acceptance_tolerance {
            TrimStatus::ResidualAboveTolerance
        } else {
            TrimStatus::Converged
        };
        let converged = status == TrimStatus::Converged;

        if converged {
            info!(
                "Trimmed at {:.1} m/s: alpha={:.2}°, throttle={:.3}, elevator={:.2}°, cost {:.3e}, {} iterations",
                request.airspeed,
                rad_to_deg(condition.alpha),
                condition.throttle,
                rad_to_deg(condition.elevator),
                cost,
                iterations
            );
        } else {
            warn!(
                "Trim at {:.1} m/s did not converge ({:?}): alpha={:.2}°, throttle={:.3}, elevator={:.2}°, cost {:.3e}",
                request.airspeed,
                status,
                rad_to_deg(condition.alpha),
                condition.throttle,
                rad_to_deg(condition.elevator),
                cost
            );
        }

        Ok(TrimResult {
            request: *request,
            condition,
            controls,
            converged,
            cost,
            residuals,
            status,
            iterations,
        })
    }

    /// Solve independent requests in parallel.
    pub fn solve_many(&self, requests: &[TrimRequest]) -> Vec<Result<TrimResult>> {
        requests.par_iter().map(|request| self.solve(request)).collect()
    }

    fn direct_search(&self, problem: &TrimProblem<'_>, init_param: &[f64]) -> Result<StageResult> {
        let bounds = &self.config.bounds;
        let mut simplex = Vec::with_capacity(init_param.len() + 1);
        simplex.push(init_param.to_vec());

        // Step each variable towards the interior of its range
        for variable in TrimVariable::ALL {
            let i = variable.index();
            let (min, max) = bounds.range(variable);
            let step = SIMPLEX_EDGE * (max - min);
            let mut vertex = init_param.to_vec();
            vertex[i] = if vertex[i] + step <= max {
                vertex[i] + step
            } else {
                vertex[i] - step
            };
            simplex.push(vertex);
        }

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(SIMPLEX_SD_TOLERANCE)
            .map_err(optimizer_error)?;

        let result = Executor::new(problem.clone(), solver)
            .configure(|state| {
                state
                    .max_iters(self.config.max_iterations)
                    .target_cost(self.config.target_cost)
            })
            .run()
            .map_err(optimizer_error)?;

        let state = &result.state;
        Ok(StageResult {
            param: state
                .get_best_param()
                .cloned()
                .unwrap_or_else(|| init_param.to_vec()),
            cost: state.get_best_cost(),
            iterations: state.get_iter(),
        })
    }

    fn gradient_refinement(&self, problem: &TrimProblem<'_>, init_param: &[f64]) -> Result<StageResult> {
        let linesearch = MoreThuenteLineSearch::new()
            .with_c(1e-4, 0.5)
            .map_err(optimizer_error)?;

        let solver = LBFGS::new(linesearch, 7);

        let result = Executor::new(problem.clone(), solver)
            .configure(|state| {
                state
                    .param(init_param.to_vec())
                    .max_iters(self.config.max_gradient_iterations)
                    .target_cost(self.config.target_cost)
            })
            .run()
            .map_err(optimizer_error)?;

        let state = &result.state;
        let param = state
            .get_best_param()
            .cloned()
            .ok_or_else(|| SimError::Optimizer("L-BFGS returned no parameters".into()))?;
        Ok(StageResult {
            param,
            cost: state.get_best_cost(),
            iterations: state.get_iter(),
        })
    }

    /// Variables whose value lies on, or within the configured margin of, a bound.
    fn variables_at_bound(&self, values: &[f64]) -> Vec<TrimVariable> {
        TrimVariable::ALL
            .into_iter()
            .filter(|variable| {
                let (min, max) = self.config.bounds.range(*variable);
                let margin = self.config.bound_margin * (max - min);
                let value = values[variable.index()];
                value <= min + margin || value >= max - margin
            })
            .collect()
    }
}

/// Mask of thrusters following the trim throttle.
fn driven_thrusters(params: &VehicleParameters, names: Option<&[String]>) -> Result<Vec<bool>> {
    let Some(names) = names else {
        return Ok(vec![true; params.thrusters().len()]);
    };

    if let Some(unknown) = names.iter().find(|n| params.thruster_index(n).is_none()) {
        return Err(SimError::InvalidConfig(format!(
            "trim throttle names unknown thruster '{}' on '{}'",
            unknown,
            params.name()
        )));
    }

    Ok(params
        .thrusters()
        .iter()
        .map(|t| names.contains(&t.name))
        .collect())
}

fn optimizer_error(err: argmin::core::Error) -> SimError {
    SimError::Optimizer(err.to_string())
}
