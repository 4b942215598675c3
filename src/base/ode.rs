use log::trace;

use crate::{LinearCombination, ODEError, PhasePoint, PhaseVectorField, RealField, StepFunction, TimeGrid};

/// Marks the state of the ODE after a call to [`FixedGridStepper::step`]
#[derive(Debug, Clone, PartialEq)]
pub enum ODEState<T> {
    /// A step of size dt was taken
    Ok(T),
    /// The end of the grid was reached
    Done,
    Err(ODEError),
}

/// Advances a phase point across a [`TimeGrid`] one subinterval at a time.
///
/// The stepper takes exactly `num_grids - 1` steps, then emits `Done`
/// perpetually. A zero-length grid emits `Done` immediately without
/// evaluating the vector field. After an error the stepper is fused and
/// keeps the last accepted `(t, x)`.
pub struct FixedGridStepper<'a, T, V, F: ?Sized, Sf> {
    f: &'a mut F,
    step_fn: &'a Sf,
    grid: TimeGrid<T>,
    idx: usize,
    t: T,
    x: PhasePoint<V>,
    failed: bool,
}

impl<'a, T, V, F, Sf> FixedGridStepper<'a, T, V, F, Sf>
where
    T: RealField,
    V: Clone + LinearCombination,
    V::Scalar: From<T>,
    F: PhaseVectorField<T, V> + ?Sized,
    Sf: StepFunction,
{
    pub fn new(f: &'a mut F, step_fn: &'a Sf, grid: TimeGrid<T>, x0: PhasePoint<V>) -> Self {
        let t = grid.start();
        let idx = if grid.is_degenerate() { grid.num_intervals() } else { 0 };
        Self { f, step_fn, grid, idx, t, x: x0, failed: false }
    }

    pub fn current(&self) -> (T, &PhasePoint<V>) {
        (self.t, &self.x)
    }

    pub fn into_current(self) -> (T, PhasePoint<V>) {
        (self.t, self.x)
    }

    /// Index of the current grid point
    pub fn grid_index(&self) -> usize {
        self.idx
    }

    pub fn grid(&self) -> &TimeGrid<T> {
        &self.grid
    }

    pub fn is_done(&self) -> bool {
        self.failed || self.idx >= self.grid.num_intervals()
    }

    /// Perform a single step of the integration
    pub fn step(&mut self) -> ODEState<T> {
        if self.is_done() {
            return ODEState::Done;
        }
        let next_t = match self.grid.get(self.idx + 1) {
            None => return ODEState::Done,
            Some(t) => t,
        };
        let dt = next_t - self.t;

        match self.step_fn.step(&mut *self.f, self.t, dt, &self.x) {
            Ok(next_x) => {
                self.x = next_x;
                self.t = next_t;
                self.idx += 1;
                trace!("fixed grid step {}/{}: t = {}, dt = {}",
                       self.idx, self.grid.num_intervals(), self.t, dt);
                ODEState::Ok(dt)
            }
            Err(e) => {
                self.failed = true;
                ODEState::Err(e)
            }
        }
    }

    /// Steps until the end of the grid and returns the final phase point
    pub fn run(mut self) -> Result<PhasePoint<V>, ODEError> {
        loop {
            match self.step() {
                ODEState::Ok(_) => {}
                ODEState::Done => return Ok(self.x),
                ODEState::Err(e) => return Err(e),
            }
        }
    }
}

impl<'a, T, V, F, Sf> Iterator for FixedGridStepper<'a, T, V, F, Sf>
where
    T: RealField,
    V: Clone + LinearCombination,
    V::Scalar: From<T>,
    F: PhaseVectorField<T, V> + ?Sized,
    Sf: StepFunction,
{
    type Item = Result<(T, PhasePoint<V>), ODEError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            ODEState::Ok(_) => Some(Ok((self.t, self.x.clone()))),
            ODEState::Done => None,
            ODEState::Err(e) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_done() {
            return (0, Some(0));
        }
        (0, Some(self.grid.num_intervals() - self.idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pointwise, Euler, StepMethod};
    use approx::assert_relative_eq;

    #[test]
    fn test_stepper_walks_the_grid() {
        let mut f = pointwise(|_t: f64, x: &f64| -x);
        let grid = TimeGrid::new(0.0, 1.0, 5).unwrap();
        let mut stepper = FixedGridStepper::new(&mut f, &Euler, grid, PhasePoint::Single(1.0));

        let mut n = 0;
        while let ODEState::Ok(dt) = stepper.step() {
            assert_relative_eq!(dt, 0.25);
            n += 1;
        }
        assert_eq!(n, 4);
        assert_eq!(stepper.grid_index(), 4);
        assert_eq!(stepper.step(), ODEState::Done);

        let (tf, xf) = stepper.into_current();
        assert_eq!(tf, 1.0);
        assert_relative_eq!(xf.into_single().unwrap(), 0.75_f64.powi(4), epsilon = 1.0e-15);
    }

    #[test]
    fn test_stepper_iterator() {
        let mut f = pointwise(|_t: f64, x: &f64| 2.0 * x);
        let grid = TimeGrid::new(0.0, 0.3, 4).unwrap();
        let stepper = FixedGridStepper::new(&mut f, &StepMethod::Euler, grid, PhasePoint::Single(1.0));
        assert_eq!(stepper.size_hint(), (0, Some(3)));

        let states: Vec<_> = stepper.collect::<Result<_, _>>().unwrap();
        assert_eq!(states.len(), 3);
        assert_relative_eq!(states[2].0, 0.3);
        assert_relative_eq!(*states[2].1.as_single().unwrap(), 1.2_f64.powi(3), epsilon = 1.0e-12);
    }

    #[test]
    fn test_degenerate_grid_skips_the_field() {
        let mut calls = 0;
        let mut f = |_t: f64, x: &PhasePoint<f64>| {
            calls += 1;
            Ok::<_, ODEError>(x.clone())
        };
        let grid = TimeGrid::new(3.0, 3.0, 10).unwrap();
        let stepper = FixedGridStepper::new(&mut f, &StepMethod::RK4, grid, PhasePoint::Single(7.0));
        assert!(stepper.is_done());
        assert_eq!(stepper.run().unwrap(), PhasePoint::Single(7.0));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_stepper_fuses_after_error() {
        let mut f = |t: f64, x: &PhasePoint<f64>| {
            if t > 0.4 {
                Err(ODEError::vector_field("blew up"))
            } else {
                Ok(x.clone())
            }
        };
        let grid = TimeGrid::new(0.0, 1.0, 5).unwrap();
        let mut stepper = FixedGridStepper::new(&mut f, &Euler, grid, PhasePoint::Single(1.0));
        assert_eq!(stepper.step(), ODEState::Ok(0.25));
        assert_eq!(stepper.step(), ODEState::Ok(0.25));
        assert!(matches!(stepper.step(), ODEState::Err(ODEError::VectorField(_))));
        assert_eq!(stepper.step(), ODEState::Done);
        assert_eq!(stepper.current().0, 0.5);
    }
}
