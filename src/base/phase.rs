use approx::{AbsDiffEq, RelativeEq};
use std::slice;

use crate::{LinearCombination, ODEError};

/// The state being integrated: a single tensor, or an ordered list of
/// tensors describing coupled subsystems.
#[derive(Debug, Clone, PartialEq)]
pub enum PhasePoint<V> {
    Single(V),
    Composite(Vec<V>),
}

impl<V> PhasePoint<V> {
    /// Number of tensors in the phase point
    pub fn arity(&self) -> usize {
        match self {
            PhasePoint::Single(_) => 1,
            PhasePoint::Composite(v) => v.len(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, PhasePoint::Composite(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PhasePoint::Single(_) => "single",
            PhasePoint::Composite(_) => "composite",
        }
    }

    /// Views the tensors in order. A single phase point is a slice of length one.
    pub fn as_slice(&self) -> &[V] {
        match self {
            PhasePoint::Single(x) => slice::from_ref(x),
            PhasePoint::Composite(v) => v.as_slice(),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.as_slice().iter()
    }

    pub fn as_single(&self) -> Option<&V> {
        match self {
            PhasePoint::Single(x) => Some(x),
            PhasePoint::Composite(_) => None,
        }
    }

    pub fn into_single(self) -> Option<V> {
        match self {
            PhasePoint::Single(x) => Some(x),
            PhasePoint::Composite(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<V> {
        match self {
            PhasePoint::Single(x) => vec![x],
            PhasePoint::Composite(v) => v,
        }
    }

    /// Applies `f` to every tensor, keeping the single/composite structure
    pub fn map<U, F>(&self, mut f: F) -> PhasePoint<U>
    where
        F: FnMut(&V) -> U,
    {
        match self {
            PhasePoint::Single(x) => PhasePoint::Single(f(x)),
            PhasePoint::Composite(v) => PhasePoint::Composite(v.iter().map(f).collect()),
        }
    }

    pub fn try_map<U, F>(&self, mut f: F) -> Result<PhasePoint<U>, ODEError>
    where
        F: FnMut(&V) -> Result<U, ODEError>,
    {
        Ok(match self {
            PhasePoint::Single(x) => PhasePoint::Single(f(x)?),
            PhasePoint::Composite(v) => PhasePoint::Composite(v.iter().map(f).collect::<Result<_, _>>()?),
        })
    }

    /// Checks that `other` has the same kind and arity as `self`
    pub fn conforms<U>(&self, other: &PhasePoint<U>) -> Result<(), ODEError> {
        if self.is_composite() != other.is_composite() {
            return Err(ODEError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            });
        }
        if self.arity() != other.arity() {
            return Err(ODEError::ArityMismatch {
                expected: self.arity(),
                found: other.arity(),
            });
        }
        Ok(())
    }
}

impl<V> PhasePoint<V>
where
    V: Clone + LinearCombination,
{
    /// Returns `self + k * u`, zipping list entries positionally
    pub fn axpy(&self, k: V::Scalar, u: &Self) -> Result<Self, ODEError> {
        self.linear_combination(&[(k, u)])
    }

    /// Returns `self + sum_i k_i u_i`. Every stage combination of the
    /// explicit schemes goes through here, for single and composite states alike.
    pub fn linear_combination(&self, terms: &[(V::Scalar, &Self)]) -> Result<Self, ODEError> {
        for (_, u) in terms {
            self.conforms(*u)?;
        }
        let mut out = self.clone();
        for (pos, x) in out.iter_mut_inner().enumerate() {
            for (k, u) in terms {
                x.add_scalar_mul(*k, &u.as_slice()[pos]);
            }
        }
        Ok(out)
    }

    fn iter_mut_inner(&mut self) -> slice::IterMut<'_, V> {
        match self {
            PhasePoint::Single(x) => slice::from_mut(x).iter_mut(),
            PhasePoint::Composite(v) => v.iter_mut(),
        }
    }
}

impl<V: AbsDiffEq> AbsDiffEq for PhasePoint<V>
where
    V::Epsilon: Copy,
{
    type Epsilon = V::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        V::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.conforms(other).is_ok()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<V: RelativeEq> RelativeEq for PhasePoint<V>
where
    V::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        V::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.conforms(other).is_ok()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_axpy_single_and_composite() {
        let x = PhasePoint::Single(1.0);
        let k = PhasePoint::Single(2.0);
        assert_eq!(x.axpy(0.5, &k).unwrap(), PhasePoint::Single(2.0));

        let x = PhasePoint::Composite(vec![array![1.0, 1.0], array![0.0]]);
        let k = PhasePoint::Composite(vec![array![1.0, -1.0], array![4.0]]);
        let y = x.axpy(0.25, &k).unwrap();
        assert_eq!(y, PhasePoint::Composite(vec![array![1.25, 0.75], array![1.0]]));
    }

    #[test]
    fn test_linear_combination() {
        let x = PhasePoint::Composite(vec![1.0, 10.0]);
        let a = PhasePoint::Composite(vec![1.0, 2.0]);
        let b = PhasePoint::Composite(vec![3.0, 4.0]);
        let y = x.linear_combination(&[(1.0, &a), (-1.0, &b)]).unwrap();
        assert_relative_eq!(y, PhasePoint::Composite(vec![-1.0, 8.0]));

        assert_eq!(x.linear_combination(&[]).unwrap(), x);
    }

    #[test]
    fn test_mismatched_states() {
        let x = PhasePoint::Composite(vec![1.0, 2.0]);
        let short = PhasePoint::Composite(vec![1.0]);
        assert_eq!(
            x.axpy(1.0, &short).unwrap_err(),
            ODEError::ArityMismatch { expected: 2, found: 1 }
        );

        let single = PhasePoint::Single(1.0);
        assert_eq!(
            short.axpy(1.0, &single).unwrap_err(),
            ODEError::KindMismatch { expected: "composite", found: "single" }
        );
        assert!(x.linear_combination(&[(1.0, &x), (1.0, &short)]).is_err());
    }

    #[test]
    fn test_accessors() {
        let x = PhasePoint::Single(3.0);
        assert_eq!(x.arity(), 1);
        assert_eq!(x.as_slice(), &[3.0]);
        assert_eq!(x.as_single(), Some(&3.0));
        assert_eq!(x.map(|v| v * 2.0).into_vec(), vec![6.0]);

        let y = PhasePoint::Composite(vec![1.0, 2.0, 3.0]);
        assert!(y.is_composite());
        assert_eq!(y.arity(), 3);
        assert_eq!(y.clone().into_single(), None);
        assert_eq!(y.iter().sum::<f64>(), 6.0);
        assert!(y.try_map(|_| Err::<f64, _>(ODEError::EmptyTrajectory)).is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = PhasePoint::Composite(vec![1.0, 2.0]);
        let b = PhasePoint::Composite(vec![1.0 + 1.0e-12, 2.0]);
        assert_relative_eq!(a, b, epsilon = 1.0e-10);
        assert!(!a.abs_diff_eq(&PhasePoint::Composite(vec![1.0]), 1.0));
        assert!(!PhasePoint::Single(1.0).abs_diff_eq(&PhasePoint::Composite(vec![1.0]), 1.0));
    }
}
