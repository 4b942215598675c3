//! Fixed-grid explicit ODE integrators for phase vector fields.
//!
//! A [`FixedGridSolver`] partitions `[start, end]` into an evenly spaced grid and
//! advances a [`PhasePoint`] across it with a [`StepFunction`] (Euler, RK2 or RK4).
//! The phase point is either a single tensor or an ordered list of coupled tensors;
//! any state type implementing [`LinearCombination`] can be integrated.
//!
//! ```
//! use node_ode::{FixedGridSolver, PhasePoint, StepMethod, pointwise};
//!
//! let solver = FixedGridSolver::new(StepMethod::RK4, 101).unwrap();
//! let mut forward = solver.forward(pointwise(|_t: f64, x: &f64| *x));
//! let x1 = forward.integrate(0.0, 1.0, PhasePoint::Single(1.0)).unwrap();
//! assert!((x1.into_single().unwrap() - std::f64::consts::E).abs() < 1.0e-8);
//! ```

use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

mod base;
mod error;
pub mod impls;
mod lc;
pub mod node;

pub use base::*;
pub use error::ODEError;
pub use lc::{LinearCombination, Stack};
pub use node::NodeWrapper;

/// Scalar type of the independent (time) variable
pub trait RealField: Float + FromPrimitive + Debug + Display + Send + Sync + 'static {}

impl<T> RealField for T where T: Float + FromPrimitive + Debug + Display + Send + Sync + 'static {}
