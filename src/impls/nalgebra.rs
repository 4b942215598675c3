use nalgebra::{ClosedAdd, ClosedMul, Dim, Matrix, Scalar};
use nalgebra::base::storage::StorageMut;

use crate::LinearCombination;

impl<N, R, C, S> LinearCombination for Matrix<N, R, C, S>
where N: Scalar + Copy + ClosedAdd + ClosedMul,
      R: Dim, C: Dim, S: StorageMut<N, R, C>
{
    type Scalar = N;

    fn add_scalar_mul(&mut self, k: N, other: &Self) {
        for (s, t) in self.iter_mut().zip(other.iter()){
            *s = k * *t + *s ;
        }
    }
}
