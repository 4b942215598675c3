use itertools::Itertools;

use crate::{ODEError, RealField};

/// `num_grids` evenly spaced time points from `start` to `end`, both included.
///
/// The last point is `end` itself rather than an accumulated sum, so the
/// integration always lands on the requested end time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid<T> {
    points: Vec<T>,
}

impl<T: RealField> TimeGrid<T> {
    pub fn new(start: T, end: T, num_grids: usize) -> Result<Self, ODEError> {
        if num_grids < 2 {
            return Err(ODEError::InvalidGrid { num_grids });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(ODEError::invalid_time(start, end));
        }
        if start == end {
            return Ok(Self { points: vec![start; num_grids] });
        }
        let intervals = T::from_usize(num_grids - 1).ok_or(ODEError::InvalidGrid { num_grids })?;

        // interpolate instead of forming `end - start`, which can overflow
        let mut points = Vec::with_capacity(num_grids);
        points.push(start);
        for i in 1..num_grids - 1 {
            let frac = T::from_usize(i).ok_or(ODEError::InvalidGrid { num_grids })? / intervals;
            points.push(start * (T::one() - frac) + end * frac);
        }
        points.push(end);

        Ok(Self { points })
    }

    pub fn start(&self) -> T {
        self.points[0]
    }

    pub fn end(&self) -> T {
        self.points[self.points.len() - 1]
    }

    /// True when the grid spans a zero-length interval
    pub fn is_degenerate(&self) -> bool {
        self.start() == self.end()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn num_intervals(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> &[T] {
        &self.points
    }

    pub fn get(&self, i: usize) -> Option<T> {
        self.points.get(i).copied()
    }

    /// Iterates the `(t, dt)` pairs of every subinterval in order
    pub fn intervals(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.points.iter().tuple_windows().map(|(&t, &next_t)| (t, next_t - t))
    }
}
