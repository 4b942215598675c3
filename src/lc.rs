use ndarray::Array1;
use num_complex::Complex;
use num_traits::Num;

use crate::ODEError;

/// Linear combination operations on a vector space type with respect to
/// its scalar type. Every state that can be integrated implements this
/// trait; the step functions only ever accumulate `x += k * u`.
pub trait LinearCombination: Sized {
    type Scalar: Copy;

    /// scale u to k * u and add to self
    fn add_scalar_mul(&mut self, k: Self::Scalar, u: &Self);
}

/// States that can be stacked along a new leading axis
pub trait Stack: Sized {
    type Stacked;

    fn stack(items: &[&Self]) -> Result<Self::Stacked, ODEError>;
}

macro_rules! impl_real_lc {
    ($($t:ty),*) => {$(
        impl LinearCombination for $t {
            type Scalar = $t;

            #[inline]
            fn add_scalar_mul(&mut self, k: $t, u: &$t) {
                *self += k * *u;
            }
        }

        impl Stack for $t {
            type Stacked = Array1<$t>;

            fn stack(items: &[&$t]) -> Result<Array1<$t>, ODEError> {
                if items.is_empty() {
                    return Err(ODEError::EmptyTrajectory);
                }
                Ok(items.iter().map(|&&x| x).collect())
            }
        }
    )*};
}

impl_real_lc!(f32, f64);

impl<T> LinearCombination for Complex<T>
where
    T: Clone + Copy + Num,
{
    type Scalar = Complex<T>;

    fn add_scalar_mul(&mut self, k: Complex<T>, u: &Self) {
        *self = *self + k * *u;
    }
}

impl<T> Stack for Complex<T>
where
    T: Clone + Copy + Num,
{
    type Stacked = Array1<Complex<T>>;

    fn stack(items: &[&Self]) -> Result<Self::Stacked, ODEError> {
        if items.is_empty() {
            return Err(ODEError::EmptyTrajectory);
        }
        Ok(items.iter().map(|&&z| z).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64 as c64;

    #[test]
    fn test_real_accumulate() {
        let mut x = 2.0_f64;
        x.add_scalar_mul(0.5, &4.0);
        assert_relative_eq!(x, 4.0);
        x.add_scalar_mul(-2.0, &1.5);
        assert_relative_eq!(x, 1.0);

        let mut y = 1.0_f32;
        y.add_scalar_mul(0.0, &f32::MAX);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_complex_accumulate() {
        let mut z = c64::new(1.0, 0.0);
        z.add_scalar_mul(c64::i(), &c64::new(1.0, 0.0));
        assert_relative_eq!(z.re, 1.0);
        assert_relative_eq!(z.im, 1.0);
        // multiplying by i rotates the increment a quarter turn
        z.add_scalar_mul(c64::i(), &c64::new(0.0, 1.0));
        assert_relative_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, 1.0);
    }

    #[test]
    fn test_stack_scalars() {
        let s = f64::stack(&[&1.0, &2.0, &3.0]).unwrap();
        assert_eq!(s, Array1::from(vec![1.0, 2.0, 3.0]));
        assert_eq!(f32::stack(&[]).unwrap_err(), ODEError::EmptyTrajectory);

        let z = c64::stack(&[&c64::new(0.0, 1.0), &c64::new(2.0, 0.0)]).unwrap();
        assert_eq!(z, Array1::from(vec![c64::new(0.0, 1.0), c64::new(2.0, 0.0)]));
    }
}
