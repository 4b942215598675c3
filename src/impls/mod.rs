//! [`LinearCombination`](crate::LinearCombination) implementations for
//! third party array and tensor types.

pub mod ndarray;
#[cfg(feature = "nalgebra")]
pub mod nalgebra;
#[cfg(feature = "burn")]
pub mod burn;
