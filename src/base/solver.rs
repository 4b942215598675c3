use log::debug;

use crate::{
    FixedGridStepper, LinearCombination, ODEError, ODEState, PhasePoint, PhaseVectorField, RealField, Stack,
    StepFunction, StepMethod, TimeGrid,
};

/// ODE solver with a fixed grid method.
///
/// Holds the step function and the number of grid points. Call
/// [`forward`](FixedGridSolver::forward) to bind it to a vector field.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGridSolver<Sf = StepMethod> {
    step_fn: Sf,
    num_grids: usize,
}

impl<Sf: StepFunction> FixedGridSolver<Sf> {
    /// Fails with [`ODEError::InvalidGrid`] unless `num_grids >= 2`
    pub fn new(step_fn: Sf, num_grids: usize) -> Result<Self, ODEError> {
        if num_grids < 2 {
            return Err(ODEError::InvalidGrid { num_grids });
        }
        debug!("fixed grid solver: order {} method, {} grid points",
               step_fn.order(), num_grids);
        Ok(Self { step_fn, num_grids })
    }

    pub fn num_grids(&self) -> usize {
        self.num_grids
    }

    pub fn step_fn(&self) -> &Sf {
        &self.step_fn
    }

    /// Binds the solver to a vector field, producing a callable that can be
    /// integrated repeatedly with different bounds and initial states.
    pub fn forward<F>(&self, field: F) -> Forward<Sf, F>
    where
        Sf: Clone,
    {
        Forward {
            solver: self.clone(),
            field,
        }
    }
}

/// A [`FixedGridSolver`] bound to a specific vector field
#[derive(Debug, Clone)]
pub struct Forward<Sf, F> {
    solver: FixedGridSolver<Sf>,
    field: F,
}

impl<Sf: StepFunction, F> Forward<Sf, F> {
    pub fn solver(&self) -> &FixedGridSolver<Sf> {
        &self.solver
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn into_field(self) -> F {
        self.field
    }

    /// Returns a stepper over the grid from `start_time` to `end_time`
    pub fn stepper<T, V>(
        &mut self,
        start_time: T,
        end_time: T,
        initial_state: PhasePoint<V>,
    ) -> Result<FixedGridStepper<'_, T, V, F, Sf>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V>,
    {
        let grid = TimeGrid::new(start_time, end_time, self.solver.num_grids)?;
        Ok(FixedGridStepper::new(&mut self.field, &self.solver.step_fn, grid, initial_state))
    }

    /// Integrates `initial_state` from `start_time` to `end_time` and returns the final state
    pub fn integrate<T, V>(&mut self, start_time: T, end_time: T, initial_state: PhasePoint<V>)
        -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V>,
    {
        debug!("integrating from t = {} to t = {} over {} grid points",
               start_time, end_time, self.solver.num_grids);
        self.stepper(start_time, end_time, initial_state)?.run()
    }

    /// As [`integrate`](Forward::integrate), additionally recording the state
    /// at every grid point
    pub fn integrate_with_trajectory<T, V>(
        &mut self,
        start_time: T,
        end_time: T,
        initial_state: PhasePoint<V>,
    ) -> Result<(PhasePoint<V>, Trajectory<T, V>), ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V>,
    {
        let num_grids = self.solver.num_grids;
        let mut traj = Trajectory::with_capacity(num_grids);
        traj.push(start_time, initial_state.clone());

        let mut stepper = self.stepper(start_time, end_time, initial_state)?;
        loop {
            match stepper.step() {
                ODEState::Ok(_) => {
                    let (t, x) = stepper.current();
                    traj.push(t, x.clone());
                }
                ODEState::Done => break,
                ODEState::Err(e) => return Err(e),
            }
        }

        let grid = stepper.grid().clone();
        let (_, x) = stepper.into_current();
        // a zero-length interval records the initial state at every grid point
        for &t in &grid.points()[traj.len()..] {
            traj.push(t, x.clone());
        }
        Ok((x, traj))
    }
}

/// States recorded at every grid point of an integration
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T, V> {
    times: Vec<T>,
    states: Vec<PhasePoint<V>>,
}

impl<T: Copy, V> Trajectory<T, V> {
    fn with_capacity(n: usize) -> Self {
        Self {
            times: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, t: T, x: PhasePoint<V>) {
        self.times.push(t);
        self.states.push(x);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn times(&self) -> &[T] {
        &self.times
    }

    pub fn states(&self) -> &[PhasePoint<V>] {
        &self.states
    }

    pub fn get(&self, i: usize) -> Option<(T, &PhasePoint<V>)> {
        Some((*self.times.get(i)?, self.states.get(i)?))
    }

    pub fn last(&self) -> Option<(T, &PhasePoint<V>)> {
        self.get(self.len().checked_sub(1)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, &PhasePoint<V>)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    pub fn into_states(self) -> Vec<PhasePoint<V>> {
        self.states
    }

    /// Stacks the recorded states along a new leading axis, separately for
    /// every position of a composite phase point
    pub fn stacked(&self) -> Result<PhasePoint<V::Stacked>, ODEError>
    where
        V: Stack,
    {
        let first = self.states.first().ok_or(ODEError::EmptyTrajectory)?;
        for x in &self.states[1..] {
            first.conforms(x)?;
        }

        let columns = (0..first.arity())
            .map(|pos| {
                let column: Vec<&V> = self.states.iter().map(|x| &x.as_slice()[pos]).collect();
                V::stack(&column)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match first {
            PhasePoint::Single(_) => PhasePoint::Single(columns.into_iter().next().ok_or(ODEError::EmptyTrajectory)?),
            PhasePoint::Composite(_) => PhasePoint::Composite(columns),
        })
    }
}
