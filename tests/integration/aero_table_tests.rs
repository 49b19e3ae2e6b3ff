use approx::assert_relative_eq;
use flyer_dynamics::{
    components::{
        AeroLookup, AeroQuery, ControlSurfaces, DatcomTableModel, LookupTable, OutOfBounds,
    },
    systems::{OutputChannel, SimOutputs},
    ControlInputs, SimError, StateVector, TrimRequest, TrimSolver, TrimSolverConfig,
    VehicleModel,
};
use nalgebra::Vector3;

use crate::common::{create_test_derivatives, create_test_uav};

const ALPHAS: [f64; 5] = [-0.1, 0.0, 0.1, 0.2, 0.3];
const ELEVATORS: [f64; 3] = [-0.3, 0.0, 0.3];

/// Tabulate the test derivatives on an alpha / elevator grid.
fn tabulated_derivatives() -> LookupTable {
    let derivatives = create_test_derivatives();
    let mut rows = Vec::new();
    for alpha in ALPHAS {
        for elevator in ELEVATORS {
            let query = AeroQuery {
                alpha,
                beta: 0.0,
                mach: 0.1,
                surfaces: ControlSurfaces::new(elevator, 0.0),
                rates_hat: Vector3::zeros(),
            };
            let coeffs = derivatives.coefficients(&query).unwrap();
            rows.push(vec![
                alpha,
                elevator,
                -coeffs.force.x,
                -coeffs.force.z,
                coeffs.moment.y,
            ]);
        }
    }
    LookupTable::from_rows(&["alpha", "elevator"], &["CA", "CN", "CM"], &rows).unwrap()
}

#[test]
fn test_table_matches_derivatives_on_grid() {
    let params = create_test_uav();
    let derivatives = create_test_derivatives();
    let table = DatcomTableModel::new(tabulated_derivatives()).unwrap();

    let mut state = StateVector::new(1);
    state.position.z = -200.0;
    state.velocity = Vector3::new(35.0 * 0.1f64.cos(), 0.0, 35.0 * 0.1f64.sin());
    let controls = ControlInputs::uniform(ControlSurfaces::default(), 0.5, 1);

    let from_table = VehicleModel::new(&params, &table)
        .evaluate(0.0, &state, &controls)
        .unwrap();
    let from_derivatives = VehicleModel::new(&params, &derivatives)
        .evaluate(0.0, &state, &controls)
        .unwrap();

    let table_outputs = SimOutputs::from_evaluation(&state, &from_table);
    let derivative_outputs = SimOutputs::from_evaluation(&state, &from_derivatives);

    assert_relative_eq!(table_outputs.get(OutputChannel::Alpha), 0.1, epsilon = 1e-12);
    for channel in [
        OutputChannel::FxAero,
        OutputChannel::FzAero,
        OutputChannel::MyAero,
        OutputChannel::Fx,
        OutputChannel::Fz,
        OutputChannel::My,
    ] {
        assert_relative_eq!(
            table_outputs.get(channel),
            derivative_outputs.get(channel),
            epsilon = 1e-6
        );
    }
    assert_eq!(table_outputs.get(OutputChannel::FyAero), 0.0);
}

#[test]
fn test_trim_on_tabulated_aero() {
    let params = create_test_uav();
    let table = DatcomTableModel::new(tabulated_derivatives()).unwrap();
    let solver =
        TrimSolver::new(VehicleModel::new(&params, &table), TrimSolverConfig::default()).unwrap();

    // Linear interpolation of the quadratic drag shifts the trim slightly
    let result = solver.solve(&TrimRequest::new(40.0)).unwrap();
    assert!(result.converged, "{:?}", result.status);
    assert_relative_eq!(result.condition.alpha, 0.11322, epsilon = 1e-3);
}

#[test]
fn test_out_of_range_policy() {
    let params = create_test_uav();
    let table = DatcomTableModel::new(tabulated_derivatives())
        .unwrap()
        .with_policy(OutOfBounds::Error);
    let model = VehicleModel::new(&params, &table);

    // Sixty degrees angle of attack is off the table
    let mut state = StateVector::new(1);
    state.velocity = Vector3::new(10.0, 0.0, 10.0 * 3f64.sqrt());
    let controls = ControlInputs::uniform(ControlSurfaces::default(), 0.0, 1);

    let err = model.derivative(0.0, &state, &controls).unwrap_err();
    assert!(matches!(err, SimError::OutOfRange { .. }));

    // Clamping keeps the model usable
    let clamped = DatcomTableModel::new(tabulated_derivatives()).unwrap();
    assert!(VehicleModel::new(&params, &clamped)
        .derivative(0.0, &state, &controls)
        .is_ok());
}

#[test]
fn test_table_requires_force_columns() {
    let rows = vec![vec![0.0, 0.03, 0.3], vec![0.1, 0.04, 0.8]];
    let table = LookupTable::from_rows(&["alpha"], &["CA", "CN"], &rows).unwrap();
    assert!(matches!(DatcomTableModel::new(table), Err(SimError::Table(_))));

    let table = LookupTable::from_rows(&["flap"], &["CA", "CN", "CM"], &[vec![0.0, 0.0, 0.0, 0.0]])
        .unwrap();
    assert!(DatcomTableModel::new(table).is_err());
}
