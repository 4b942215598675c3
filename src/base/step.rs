use std::fmt;
use std::str::FromStr;

use crate::{LinearCombination, ODEError, PhasePoint, PhaseVectorField, RealField};

/// A single explicit integration step `x(t) -> x(t + dt)`.
///
/// Step functions hold no state between calls. They only ever combine phase
/// points through [`PhasePoint::linear_combination`], so single and composite
/// states share one code path per scheme.
pub trait StepFunction {
    /// Order of accuracy of the global error
    fn order(&self) -> u32;

    /// Number of vector field evaluations per step
    fn num_stages(&self) -> usize;

    fn step<T, V, F>(&self, f: &mut F, t: T, dt: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V> + ?Sized;
}

fn two<T: RealField>() -> T {
    T::one() + T::one()
}

/// Evaluates the field and checks the result has the shape class of the state
fn stage<T, V, F>(f: &mut F, t: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
where
    F: PhaseVectorField<T, V> + ?Sized,
{
    let k = f.eval(t, x)?;
    x.conforms(&k)?;
    Ok(k)
}

/// Forward Euler: `x + dt f(t, x)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl StepFunction for Euler {
    fn order(&self) -> u32 {
        1
    }

    fn num_stages(&self) -> usize {
        1
    }

    fn step<T, V, F>(&self, f: &mut F, t: T, dt: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V> + ?Sized,
    {
        let k1 = stage(f, t, x)?;
        x.axpy(dt.into(), &k1)
    }
}

/// Heun's method (explicit trapezoid):
///     k1 = f(t, x)
///     k2 = f(t + dt, x + dt k1)
///     x + dt (k1 + k2) / 2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RK2;

impl StepFunction for RK2 {
    fn order(&self) -> u32 {
        2
    }

    fn num_stages(&self) -> usize {
        2
    }

    fn step<T, V, F>(&self, f: &mut F, t: T, dt: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V> + ?Sized,
    {
        let half_dt: V::Scalar = (dt / two()).into();

        let k1 = stage(f, t, x)?;
        let k2 = stage(f, t + dt, &x.axpy(dt.into(), &k1)?)?;
        x.linear_combination(&[(half_dt, &k1), (half_dt, &k2)])
    }
}

/// The classical fourth order Runge-Kutta method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RK4;

impl StepFunction for RK4 {
    fn order(&self) -> u32 {
        4
    }

    fn num_stages(&self) -> usize {
        4
    }

    fn step<T, V, F>(&self, f: &mut F, t: T, dt: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V> + ?Sized,
    {
        let half = dt / two();
        let sixth = dt / (two::<T>() * (two::<T>() + T::one()));
        let third = sixth + sixth;
        let t_mid = t + half;

        let k1 = stage(f, t, x)?;
        let k2 = stage(f, t_mid, &x.axpy(half.into(), &k1)?)?;
        let k3 = stage(f, t_mid, &x.axpy(half.into(), &k2)?)?;
        let k4 = stage(f, t + dt, &x.axpy(dt.into(), &k3)?)?;

        x.linear_combination(&[
            (sixth.into(), &k1),
            (third.into(), &k2),
            (third.into(), &k3),
            (sixth.into(), &k4),
        ])
    }
}

/// Runtime selection of one of the built-in schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepMethod {
    Euler,
    RK2,
    RK4,
}

impl StepMethod {
    pub const ALL: [StepMethod; 3] = [StepMethod::Euler, StepMethod::RK2, StepMethod::RK4];

    pub fn name(&self) -> &'static str {
        match self {
            StepMethod::Euler => "euler",
            StepMethod::RK2 => "rk2",
            StepMethod::RK4 => "rk4",
        }
    }
}

impl Default for StepMethod {
    fn default() -> Self {
        StepMethod::RK4
    }
}

impl fmt::Display for StepMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StepMethod {
    type Err = ODEError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(StepMethod::Euler),
            "rk2" | "heun" => Ok(StepMethod::RK2),
            "rk4" => Ok(StepMethod::RK4),
            other => Err(ODEError::UnknownMethod(other.to_string())),
        }
    }
}

impl StepFunction for StepMethod {
    fn order(&self) -> u32 {
        match self {
            StepMethod::Euler => Euler.order(),
            StepMethod::RK2 => RK2.order(),
            StepMethod::RK4 => RK4.order(),
        }
    }

    fn num_stages(&self) -> usize {
        match self {
            StepMethod::Euler => Euler.num_stages(),
            StepMethod::RK2 => RK2.num_stages(),
            StepMethod::RK4 => RK4.num_stages(),
        }
    }

    fn step<T, V, F>(&self, f: &mut F, t: T, dt: T, x: &PhasePoint<V>) -> Result<PhasePoint<V>, ODEError>
    where
        T: RealField,
        V: Clone + LinearCombination,
        V::Scalar: From<T>,
        F: PhaseVectorField<T, V> + ?Sized,
    {
        match self {
            StepMethod::Euler => Euler.step(f, t, dt, x),
            StepMethod::RK2 => RK2.step(f, t, dt, x),
            StepMethod::RK4 => RK4.step(f, t, dt, x),
        }
    }
}
