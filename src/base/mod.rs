pub mod config;
pub mod field;
pub mod grid;
pub mod ode;
pub mod phase;
pub mod solver;
pub mod step;

pub use config::{SolverConfig, DEFAULT_NUM_GRIDS};
pub use field::{pointwise, PhaseVectorField};
pub use grid::TimeGrid;
pub use ode::{FixedGridStepper, ODEState};
pub use phase::PhasePoint;
pub use solver::{FixedGridSolver, Forward, Trajectory};
pub use step::{Euler, StepFunction, StepMethod, RK2, RK4};
