//! Wraps a vector field into the flow map of a Neural ODE block.

use crate::{FixedGridSolver, Forward, LinearCombination, ODEError, PhasePoint, PhaseVectorField, RealField, StepFunction};

/// Flow map `x -> x(end_time)` of a vector field started at a fixed time.
///
/// Calling the wrapper integrates the phase point from `start_time` to the
/// requested end time, so the vector field can be used like a layer whose
/// output is the ODE solution.
#[derive(Debug, Clone)]
pub struct NodeWrapper<T, Sf, F> {
    forward: Forward<Sf, F>,
    start_time: T,
}

impl<T, Sf, F> NodeWrapper<T, Sf, F>
where
    T: RealField,
    Sf: StepFunction + Clone,
{
    pub fn new(solver: &FixedGridSolver<Sf>, field: F, start_time: T) -> Self {
        Self {
            forward: solver.forward(field),
            start_time,
        }
    }

    pub fn start_time(&self) -> T {
        self.start_time
    }

    pub fn field(&self) -> &F {
        self.forward.field()
    }

    pub fn call<V>(&mut self, end_time: T, x: PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V>,
    {
        self.forward.integrate(self.start_time, end_time, x)
    }
}
