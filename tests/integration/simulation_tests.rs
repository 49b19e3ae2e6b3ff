use approx::assert_relative_eq;
use flyer_dynamics::{
    components::{ControlSurfaces, ForceCategory},
    systems::{OutputChannel, SimOutputs},
    ControlInputs, Rk4, StateVector, TrimRequest, TrimSolver, TrimSolverConfig, VehicleModel,
};
use nalgebra::Vector3;

use crate::common::{
    assert_finite_state, assert_unit_attitude, assert_vector_eq, create_test_derivatives,
    create_test_uav, create_test_vtol,
};

#[test]
fn test_trimmed_flight_holds() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let model = VehicleModel::new(&params, &aero);
    let trim = TrimSolver::new(model, TrimSolverConfig::default())
        .unwrap()
        .solve(&TrimRequest::new(40.0).at_altitude(1000.0))
        .unwrap()
        .into_converged()
        .unwrap();

    let initial = trim.initial_state();
    let controls = trim.controls();
    let rk4 = Rk4::new(0.01).unwrap();

    // Two seconds of flight
    let state = rk4.propagate(&model, 0.0, &initial, &controls, 200).unwrap();

    assert_finite_state(&state);
    assert_unit_attitude(&state, 1e-9);
    assert_relative_eq!(state.altitude(), 1000.0, epsilon = 0.5);
    assert_relative_eq!(state.velocity.norm(), 40.0, epsilon = 0.05);
    assert_relative_eq!(state.position.x, 80.0, epsilon = 0.5);
    assert!(state.angular_velocity.norm() < 1e-2);
}

#[test]
fn test_elevator_pulls_nose_up() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let model = VehicleModel::new(&params, &aero);
    let trim = TrimSolver::new(model, TrimSolverConfig::default())
        .unwrap()
        .solve(&TrimRequest::new(40.0))
        .unwrap();

    let mut controls = trim.controls();
    controls.surfaces.elevator -= 0.05;

    let initial = trim.initial_state();
    let rk4 = Rk4::new(0.01).unwrap();
    let state = rk4.propagate(&model, 0.0, &initial, &controls, 50).unwrap();

    assert!(state.angular_velocity.y > 0.0);
    assert!(state.euler_angles().y > initial.euler_angles().y);
    assert_unit_attitude(&state, 1e-9);
}

#[test]
fn test_lift_rotor_spin_up() {
    let params = create_test_vtol();
    let aero = create_test_derivatives();
    let model = VehicleModel::new(&params, &aero);

    let mut state = StateVector::new(params.thrusters().len());
    state.position.z = -10.0;
    let controls = ControlInputs::new(ControlSurfaces::default(), vec![0.0, 1.0, 1.0, 1.0, 1.0]);

    // One rotor time constant
    let rk4 = Rk4::new(0.001).unwrap();
    let state = rk4.propagate(&model, 0.0, &state, &controls, 50).unwrap();

    let expected = 1.0 - (-1.0f64).exp();
    for lag in &state.thrusters[1..] {
        assert_relative_eq!(*lag, expected, epsilon = 1e-4);
    }
    assert_eq!(state.thrusters[0], 0.0);

    // Rotor lift opposes gravity, the residual airspeed is tiny
    let derivative = model.derivative(0.05, &state, &controls).unwrap();
    let lift = 4.0 * 400.0 * expected / params.mass();
    assert_relative_eq!(derivative.velocity.z, params.gravity() - lift, epsilon = 2e-2);
    assert_relative_eq!(derivative.angular_velocity.norm(), 0.0, epsilon = 1e-2);
    assert_finite_state(&state);
}

#[test]
fn test_drifting_with_the_wind() {
    let params = create_test_uav();
    let aero = create_test_derivatives();
    let wind = Vector3::new(12.0, -3.0, 0.0);
    let model = VehicleModel::new(&params, &aero).with_wind(wind);

    let mut state = StateVector::new(1);
    state.velocity = wind;
    let controls = ControlInputs::uniform(ControlSurfaces::default(), 0.0, 1);

    let eval = model.evaluate(0.0, &state, &controls).unwrap();
    assert_eq!(eval.air_data.airspeed, 0.0);
    assert_eq!(eval.forces.get(ForceCategory::Aerodynamic).force, Vector3::zeros());

    // Only gravity acts
    let g = params.gravity();
    assert_vector_eq(&eval.derivative.velocity, &Vector3::new(0.0, 0.0, g), 1e-12);
    assert_vector_eq(&eval.derivative.position, &wind, 1e-12);

    let outputs = SimOutputs::from_evaluation(&state, &eval);
    assert_relative_eq!(outputs.get(OutputChannel::FzGrav), params.mass() * g);
    assert_eq!(outputs.get(OutputChannel::Airspeed), 0.0);
}

#[test]
fn test_flat_derivative_matches_structured() {
    let params = create_test_vtol();
    let aero = create_test_derivatives();
    let model = VehicleModel::new(&params, &aero).with_wind(Vector3::new(0.0, 4.0, 0.0));

    let mut state = StateVector::with_euler(5, 0.1, 0.05, 0.3);
    state.velocity = Vector3::new(30.0, 1.0, 2.0);
    state.angular_velocity = Vector3::new(0.1, -0.05, 0.02);
    state.thrusters = vec![0.5, 0.1, 0.2, 0.3, 0.4];
    let controls = ControlInputs::new(
        ControlSurfaces::new(0.02, -0.01),
        vec![0.6, 0.0, 0.0, 1.0, 1.5],
    );

    let structured = model.derivative(0.0, &state, &controls).unwrap();
    let flat = model.derivative_flat(0.0, &state.to_vec(), &controls).unwrap();
    assert_eq!(flat, structured.to_vec());
    assert_eq!(flat.len(), 13 + 5);

    // Commands above one saturate
    assert_relative_eq!(structured.thrusters[4], (1.0 - 0.4) / 0.05);
}
