use approx::assert_relative_eq;
use flyer_dynamics::StateVector;
use nalgebra::Vector3;

/// Assert that every entry of a state is finite
#[track_caller]
pub fn assert_finite_state(state: &StateVector) {
    for (i, value) in state.to_vec().iter().enumerate() {
        assert!(value.is_finite(), "State entry {} is not finite: {}", i, value);
    }
}

/// Assert that the attitude quaternion has unit norm
#[track_caller]
pub fn assert_unit_attitude(state: &StateVector, epsilon: f64) {
    assert_relative_eq!(state.attitude.norm(), 1.0, epsilon = epsilon);
}

/// Assert that two vectors are approximately equal
#[track_caller]
pub fn assert_vector_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}
