use crate::{ODEError, PhasePoint};

/// The derivative dx/dt = f(t, x) of a phase point.
///
/// The call convention is always time first. Implementations must return a
/// phase point of the same kind and arity as `x`; the step functions report
/// an error otherwise. Closures of the matching signature implement this
/// trait directly.
pub trait PhaseVectorField<T, V> {
    fn eval(&mut self, t: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>;
}

impl<T, V, F> PhaseVectorField<T, V> for F
where
    F: FnMut(T, &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>,
{
    #[inline]
    fn eval(&mut self, t: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError> {
        self(t, x)
    }
}

/// Lifts a per-tensor field `g(t, x_i)` onto phase points, applying it to
/// every list entry independently (uncoupled subsystems).
pub fn pointwise<T, V, G>(mut g: G) -> impl FnMut(T, &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
where
    T: Copy,
    G: FnMut(T, &V) -> V,
{
    move |t, x| Ok(x.map(|xi| g(t, xi)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_twice<F: PhaseVectorField<f64, f64>>(f: &mut F, x: &PhasePoint<f64>) -> PhasePoint<f64> {
        let y = f.eval(0.0, x).unwrap();
        f.eval(1.0, &y).unwrap()
    }

    #[test]
    fn test_closure_field() {
        let mut calls = 0;
        let mut f = |t: f64, x: &PhasePoint<f64>| {
            calls += 1;
            Ok::<_, ODEError>(x.map(|v| v + t))
        };
        let y = eval_twice(&mut f, &PhasePoint::Composite(vec![1.0, 2.0]));
        assert_eq!(y, PhasePoint::Composite(vec![2.0, 3.0]));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_pointwise() {
        let mut f = pointwise(|t: f64, x: &f64| t * x);
        let y = f.eval(2.0, &PhasePoint::Composite(vec![1.0, -3.0])).unwrap();
        assert_eq!(y, PhasePoint::Composite(vec![2.0, -6.0]));
        let y = f.eval(0.5, &PhasePoint::Single(4.0)).unwrap();
        assert_eq!(y, PhasePoint::Single(2.0));
    }
}
