//! Continuous uniform distribution on `[low, high)`.
//!
//! [`Uniform::standard`] is the randomness source of the reparameterized
//! samplers in this crate: every draw starts as `u ~ U[0, 1)` and is pushed
//! through a differentiable transform of the parameters.

use ndarray::{ArrayD, IxDyn, Zip};
use pp_ad::Scalar;
use pp_core::{Error, Result, Violation, config, shape};
use rand::Rng;

use crate::distribution::{Distribution, LazyMoments};
use crate::tensor;

/// Uniform distribution `U(low, high)` with broadcast batch parameters.
#[derive(Debug, Clone)]
pub struct Uniform<S: Scalar = f64> {
    low: ArrayD<S>,
    high: ArrayD<S>,
    batch_shape: Vec<usize>,
    validate_args: bool,
    moments: LazyMoments<S>,
}

/// Draw `shape` independent `U[0, 1)` variates.
pub fn standard_draws<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> ArrayD<f64> {
    ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.random::<f64>())
}

impl<S: Scalar> Uniform<S> {
    /// Array-parameterized uniform; validation follows the process default.
    pub fn new(low: ArrayD<S>, high: ArrayD<S>) -> Result<Self> {
        Self::with_validation(low, high, config::default_validate_args())
    }

    /// Array-parameterized uniform with an explicit validation flag.
    ///
    /// # Errors
    /// `ShapeMismatch` if the parameters do not broadcast; when validating,
    /// `InvalidParameter` if `low >= high` anywhere.
    pub fn with_validation(low: ArrayD<S>, high: ArrayD<S>, validate_args: bool) -> Result<Self> {
        let batch_shape = shape::broadcast_shapes(&[low.shape(), high.shape()])?;
        let low = tensor::broadcast_to(&low, &batch_shape)?.to_owned();
        let high = tensor::broadcast_to(&high, &batch_shape)?.to_owned();
        let dist = Self::from_parts(low, high, batch_shape, validate_args);
        if validate_args && !Zip::from(&dist.low).and(&dist.high).all(|l, h| l < h) {
            return Err(Error::InvalidParameter {
                distribution: "Uniform",
                violation: Violation::LowNotBelowHigh,
            });
        }
        Ok(dist)
    }

    /// Scalar-parameterized uniform; the batch shape is empty.
    pub fn from_scalars(low: S, high: S) -> Result<Self> {
        Self::new(tensor::scalar(low), tensor::scalar(high))
    }

    fn from_parts(
        low: ArrayD<S>,
        high: ArrayD<S>,
        batch_shape: Vec<usize>,
        validate_args: bool,
    ) -> Self {
        Self { low, high, batch_shape, validate_args, moments: LazyMoments::new() }
    }

    /// Lower bound, broadcast to the batch shape.
    pub fn low(&self) -> &ArrayD<S> {
        &self.low
    }

    /// Upper bound, broadcast to the batch shape.
    pub fn high(&self) -> &ArrayD<S> {
        &self.high
    }
}

impl Uniform<f64> {
    /// `U(0, 1)` with an empty batch shape; validation follows the process
    /// default. The bounds are valid by construction.
    pub fn standard() -> Self {
        Self::from_parts(
            tensor::scalar(0.0),
            tensor::scalar(1.0),
            Vec::new(),
            config::default_validate_args(),
        )
    }
}

impl<S: Scalar> Distribution<S> for Uniform<S> {
    fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    fn validate_args(&self) -> bool {
        self.validate_args
    }

    fn has_rsample(&self) -> bool {
        true
    }

    fn rsample<R: Rng + ?Sized>(&self, sample_shape: &[usize], rng: &mut R) -> Result<ArrayD<S>> {
        let shape = self.extended_shape(sample_shape);
        let u = standard_draws(&shape, rng);
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        Ok(Zip::from(&u).and(low).and(high).map_collect(|&u, &l, &h| l + S::from_f64(u) * (h - l)))
    }

    fn log_prob(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        let shape = tensor::value_shape(value, &self.batch_shape)?;
        let x = tensor::broadcast_to(value, &shape)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        let neg_inf = S::from_f64(f64::NEG_INFINITY);
        Ok(Zip::from(x).and(low).and(high).map_collect(|&x, &l, &h| {
            if l <= x && x < h { -(h - l).ln() } else { neg_inf }
        }))
    }

    fn cdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        let shape = tensor::value_shape(value, &self.batch_shape)?;
        let x = tensor::broadcast_to(value, &shape)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        let (zero, one) = (S::from_f64(0.0), S::from_f64(1.0));
        Ok(Zip::from(x).and(low).and(high).map_collect(|&x, &l, &h| {
            let r = (x - l) / (h - l);
            if r < zero {
                zero
            } else if r > one {
                one
            } else {
                r
            }
        }))
    }

    fn icdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        if self.validate_args {
            tensor::check_probabilities(value)?;
        }
        let shape = tensor::value_shape(value, &self.batch_shape)?;
        let p = tensor::broadcast_to(value, &shape)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        Ok(Zip::from(p).and(low).and(high).map_collect(|&p, &l, &h| l + p * (h - l)))
    }

    fn mean(&self) -> &ArrayD<S> {
        self.moments.mean.get_or_init(|| {
            Zip::from(&self.low)
                .and(&self.high)
                .map_collect(|&l, &h| (l + h) / S::from_f64(2.0))
        })
    }

    fn variance(&self) -> &ArrayD<S> {
        self.moments.variance.get_or_init(|| {
            Zip::from(&self.low)
                .and(&self.high)
                .map_collect(|&l, &h| (h - l).powi(2) / S::from_f64(12.0))
        })
    }

    fn entropy(&self) -> &ArrayD<S> {
        self.moments
            .entropy
            .get_or_init(|| Zip::from(&self.low).and(&self.high).map_collect(|&l, &h| (h - l).ln()))
    }

    fn expand(&self, batch_shape: &[usize]) -> Result<Self> {
        shape::check_expand(&self.batch_shape, batch_shape)?;
        let low = tensor::broadcast_to(&self.low, batch_shape)?.to_owned();
        let high = tensor::broadcast_to(&self.high, batch_shape)?.to_owned();
        let mut expanded = Self::with_validation(low, high, false)?;
        expanded.validate_args = self.validate_args;
        Ok(expanded)
    }
}
