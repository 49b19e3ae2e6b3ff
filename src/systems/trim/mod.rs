mod problem;
mod solver;

pub use problem::{calculate_constraint_penalty, TrimProblem};
pub use solver::TrimSolver;
