//! [`Scalar`]: the element type distribution kernels are written against.
//!
//! Kernels take `S: Scalar` and run unchanged on `f64` (plain evaluation) or
//! on [`Dual`] (value plus derivative of draws and densities).

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::dual::Dual;

/// A scalar element type for distribution parameters and values.
///
/// Comparisons only look at the primal value.
pub trait Scalar:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Lift a constant (zero tangent for AD types).
    fn from_f64(v: f64) -> Self;

    /// Primal value.
    fn value(&self) -> f64;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Exponential.
    fn exp(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Integer power.
    fn powi(self, n: i32) -> Self;

    /// Same primal value with no derivative attached.
    #[inline]
    fn detach(self) -> Self {
        Self::from_f64(self.value())
    }
}

/// Forward the elementary functions to the type's inherent methods.
macro_rules! forward_elementary {
    () => {
        #[inline]
        fn ln(self) -> Self {
            Self::ln(self)
        }

        #[inline]
        fn exp(self) -> Self {
            Self::exp(self)
        }

        #[inline]
        fn sqrt(self) -> Self {
            Self::sqrt(self)
        }

        #[inline]
        fn powi(self, n: i32) -> Self {
            Self::powi(self, n)
        }
    };
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    forward_elementary!();

    #[inline]
    fn detach(self) -> Self {
        self
    }
}

impl Scalar for Dual {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val
    }

    forward_elementary!();
}
