use approx::assert_relative_eq;
use flyer_dynamics::{
    components::{TrimStatus, TrimVariable},
    systems::VehicleModel,
    utils::deg_to_rad,
    SimError, TrimRequest, TrimSolver, TrimSolverConfig,
};

use crate::common::{create_test_derivatives, create_test_uav, create_test_vtol};

#[test]
fn test_trim_cruise_speeds() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let solver =
        TrimSolver::new(VehicleModel::new(&params, &aero), TrimSolverConfig::default()).unwrap();

    // (airspeed, alpha deg, throttle, elevator deg)
    let expected = [(40.0, 6.4764, 0.27147, -3.0891), (50.0, 2.7285, 0.31453, 1.3274)];

    for (airspeed, alpha, throttle, elevator) in expected {
        let result = solver.solve(&TrimRequest::new(airspeed).at_altitude(500.0)).unwrap();
        assert!(result.converged, "trim at {} m/s: {:?}", airspeed, result.status);
        assert_eq!(result.status, TrimStatus::Converged);
        assert!(result.cost <= 1e-6);

        let c = result.condition;
        assert_relative_eq!(c.alpha, deg_to_rad(alpha), epsilon = deg_to_rad(0.05));
        assert_relative_eq!(c.throttle, throttle, epsilon = 2e-3);
        assert_relative_eq!(c.elevator, deg_to_rad(elevator), epsilon = deg_to_rad(0.1));
    }
}

#[test]
fn test_trimmed_state_is_steady() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let model = VehicleModel::new(&params, &aero);
    let solver = TrimSolver::new(model, TrimSolverConfig::default()).unwrap();

    let result = solver.solve(&TrimRequest::new(40.0)).unwrap().into_converged().unwrap();
    let state = result.initial_state();
    let derivative = model.derivative(0.0, &state, &result.controls()).unwrap();

    assert!(derivative.velocity.x.abs() < 1e-3);
    assert!(derivative.velocity.z.abs() < 1e-3);
    assert!(derivative.angular_velocity.y.abs() < 1e-3);
    // Level flight and settled thrusters
    assert!(derivative.position.z.abs() < 1e-9);
    assert!(derivative.thrusters.iter().all(|d| d.abs() < 1e-12));
    assert_relative_eq!(state.velocity.norm(), 40.0, epsilon = 1e-9);
}

#[test]
fn test_low_speed_trim_hits_alpha_bound() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let solver =
        TrimSolver::new(VehicleModel::new(&params, &aero), TrimSolverConfig::default()).unwrap();

    // Holding 30 m/s needs about 14.4 degrees, beyond the 14 degree limit
    let result = solver.solve(&TrimRequest::new(30.0)).unwrap();
    assert!(!result.converged);
    assert_eq!(result.status, TrimStatus::AtBound(vec![TrimVariable::Alpha]));
    assert_relative_eq!(result.condition.alpha, deg_to_rad(14.0), epsilon = 1e-4);

    match result.into_converged() {
        Err(SimError::TrimNotConverged { alpha, .. }) => assert!(alpha <= deg_to_rad(14.0)),
        other => panic!("expected TrimNotConverged, got {:?}", other),
    }
}

#[test]
fn test_solve_many_matches_single_solves() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let solver =
        TrimSolver::new(VehicleModel::new(&params, &aero), TrimSolverConfig::default()).unwrap();

    let requests: Vec<TrimRequest> = [35.0, 40.0, 45.0, 50.0]
        .into_iter()
        .map(TrimRequest::new)
        .collect();
    let batch = solver.solve_many(&requests);
    assert_eq!(batch.len(), requests.len());

    for (request, result) in requests.iter().zip(&batch) {
        let result = result.as_ref().unwrap();
        assert_eq!(result.request, *request);
        assert!(result.converged);

        let single = solver.solve(request).unwrap();
        assert_relative_eq!(result.condition.alpha, single.condition.alpha, epsilon = 1e-12);
    }

    // Faster flight needs less angle of attack
    let alphas: Vec<f64> = batch
        .iter()
        .map(|r| r.as_ref().unwrap().condition.alpha)
        .collect();
    assert!(alphas.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_vtol_trims_on_pusher_only() {
    let params = create_test_vtol();
    let aero = create_test_derivatives();
    let config = TrimSolverConfig::default().with_throttle_thrusters(["pusher"]);
    let solver = TrimSolver::new(VehicleModel::new(&params, &aero), config).unwrap();

    let result = solver.solve(&TrimRequest::new(40.0)).unwrap();
    assert!(result.converged, "{:?}", result.status);
    assert_relative_eq!(result.condition.alpha, deg_to_rad(6.4764), epsilon = deg_to_rad(0.05));

    // Lift rotors stay off
    let throttle = &result.controls.throttle;
    assert_eq!(throttle.len(), 5);
    assert_relative_eq!(throttle[0], result.condition.throttle);
    assert!(throttle[1..].iter().all(|t| *t == 0.0));
    assert!(result.initial_state().thrusters[1..].iter().all(|s| *s == 0.0));
}

#[test]
fn test_without_gradient_refinement() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let config = TrimSolverConfig {
        use_gradient_refinement: false,
        max_iterations: 2000,
        ..Default::default()
    };
    let solver = TrimSolver::new(VehicleModel::new(&params, &aero), config).unwrap();

    let result = solver.solve(&TrimRequest::new(45.0)).unwrap();
    assert!(result.converged, "{:?}", result.status);
    assert!(result.iterations <= 2000);
}
