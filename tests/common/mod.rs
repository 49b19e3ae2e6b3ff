mod assertions;
mod fixtures;

// Re-export
pub use assertions::{assert_finite_state, assert_unit_attitude, assert_vector_eq};
pub use fixtures::*;
