use burn::tensor::{backend::Backend, Tensor};

use crate::{LinearCombination, ODEError, Stack};

/// Float tensors of any backend, including autodiff backends. The
/// arithmetic stays inside the tensor graph so gradients flow through
/// every integration step.
impl<B: Backend, const D: usize> LinearCombination for Tensor<B, D> {
    type Scalar = f64;

    fn add_scalar_mul(&mut self, k: f64, u: &Self) {
        *self = self.clone() + u.clone().mul_scalar(k);
    }
}

// `D + 1` has no stable const generic spelling, so each rank is listed.
macro_rules! impl_tensor_stack {
    ($($d:literal => $d2:literal),*) => {$(
        /// Stacks rank-`D` tensors along a new leading axis
        impl<B: Backend> Stack for Tensor<B, $d> {
            type Stacked = Tensor<B, $d2>;

            fn stack(items: &[&Self]) -> Result<Self::Stacked, ODEError> {
                if items.is_empty() {
                    return Err(ODEError::EmptyTrajectory);
                }
                let dims = items[0].dims();
                if let Some(x) = items.iter().find(|x| x.dims() != dims) {
                    return Err(ODEError::Shape(format!(
                        "cannot stack tensors of shape {:?} and {:?}", dims, x.dims()
                    )));
                }
                let tensors: Vec<_> = items.iter().map(|&x| x.clone()).collect();
                Ok(Tensor::<B, $d>::stack::<$d2>(tensors, 0))
            }
        }
    )*};
}

impl_tensor_stack!(1 => 2, 2 => 3, 3 => 4);
