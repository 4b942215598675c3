use ndarray::{stack, ArrayBase, Axis, Array, Data, DataMut, Dimension, LinalgScalar, RemoveAxis};

use crate::{LinearCombination, Stack, ODEError};

impl<A, S, D> LinearCombination for ArrayBase<S, D>
where   A: LinalgScalar,
        S: DataMut<Elem=A>,
        D: Dimension
{
    type Scalar = A;

    fn add_scalar_mul(&mut self, k: A, rhs: &ArrayBase<S, D>) {
        self.zip_mut_with(rhs, move |y, &x| *y = *y + k * x);
    }
}

/// Stacks arrays of dimension `D` into one array of dimension `D + 1`
impl<A, S, D> Stack for ArrayBase<S, D>
where   A: Clone,
        S: Data<Elem=A>,
        D: Dimension,
        D::Larger: RemoveAxis
{
    type Stacked = Array<A, D::Larger>;

    fn stack(items: &[&Self]) -> Result<Self::Stacked, ODEError> {
        if items.is_empty() {
            return Err(ODEError::EmptyTrajectory);
        }
        let views: Vec<_> = items.iter().map(|a| a.view()).collect();
        Ok(stack(Axis(0), &views)?)
    }
}
