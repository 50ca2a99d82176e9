//! Forward-mode automatic differentiation via dual numbers.
//!
//! A [`Dual`] carries a primal value and one tangent. Seeding a distribution
//! parameter with [`Dual::var`] makes every sample, density or moment computed
//! from it carry the derivative with respect to that parameter.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Primal value `val` with tangent `dot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// Primal value.
    pub val: f64,
    /// Derivative with respect to the seeded variable.
    pub dot: f64,
}

impl Dual {
    /// A constant: zero tangent.
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self::new(val, 0.0)
    }

    /// The variable being differentiated: unit tangent.
    #[inline]
    pub fn var(val: f64) -> Self {
        Self::new(val, 1.0)
    }

    /// Explicit value and tangent.
    #[inline]
    pub fn new(val: f64, dot: f64) -> Self {
        Self { val, dot }
    }

    /// Primal `val` with tangent `dot * df` (chain rule).
    #[inline]
    fn chain(self, val: f64, df: f64) -> Self {
        Self::new(val, self.dot * df)
    }

    /// `ln(x)`, tangent `dot / x`.
    #[inline]
    pub fn ln(self) -> Self {
        self.chain(self.val.ln(), self.val.recip())
    }

    /// `exp(x)`, tangent `dot * exp(x)`.
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        self.chain(e, e)
    }

    /// `x^n`, tangent `dot * n * x^(n-1)`.
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        self.chain(self.val.powi(n), f64::from(n) * self.val.powi(n - 1))
    }

    /// `sqrt(x)`, tangent `dot / (2 sqrt(x))`.
    ///
    /// A zero tangent stays zero at `x == 0` (degenerate triangular legs).
    #[inline]
    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        if self.dot == 0.0 { Self::constant(s) } else { self.chain(s, 0.5 / s) }
    }

    /// Same value, tangent dropped.
    #[inline]
    pub fn detach(self) -> Self {
        Self::constant(self.val)
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.val, -self.dot)
    }
}

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.dot + rhs.dot)
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.val * rhs.val, self.dot * rhs.val + self.val * rhs.dot)
    }
}

impl Div for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let q = self.val / rhs.val;
        Self::new(q, (self.dot - q * rhs.dot) / rhs.val)
    }
}

/// Mixed `Dual`/`f64` arithmetic, lifting the `f64` side to a constant.
macro_rules! mixed_ops {
    ($($trait:ident::$method:ident),*) => {$(
        impl $trait<f64> for Dual {
            type Output = Dual;
            #[inline]
            fn $method(self, rhs: f64) -> Dual {
                $trait::$method(self, Dual::constant(rhs))
            }
        }

        impl $trait<Dual> for f64 {
            type Output = Dual;
            #[inline]
            fn $method(self, rhs: Dual) -> Dual {
                $trait::$method(Dual::constant(self), rhs)
            }
        }
    )*};
}

mixed_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

/// Ordered by primal value; the tangent is ignored.
impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.val.partial_cmp(&other.val)
    }
}
