//! The capability set every distribution in this crate implements.

use std::sync::OnceLock;

use ndarray::ArrayD;
use pp_ad::Scalar;
use pp_core::{Result, shape};
use rand::Rng;

/// A batched, scalar-event probability distribution over `S`.
///
/// Parameters broadcast to [`batch_shape`](Distribution::batch_shape); a
/// draw with `sample_shape` has shape `sample_shape ++ batch_shape ++
/// event_shape`.
pub trait Distribution<S: Scalar>: Sized {
    /// Broadcast shape of the parameters.
    fn batch_shape(&self) -> &[usize];

    /// Shape of a single draw from one batch element.
    fn event_shape(&self) -> &[usize] {
        &[]
    }

    /// Whether this instance validates its arguments.
    fn validate_args(&self) -> bool;

    /// Whether [`rsample`](Distribution::rsample) is differentiable in the parameters.
    fn has_rsample(&self) -> bool {
        false
    }

    /// `sample_shape ++ batch_shape ++ event_shape`.
    fn extended_shape(&self, sample_shape: &[usize]) -> Vec<usize> {
        shape::extended_shape(sample_shape, self.batch_shape(), self.event_shape())
    }

    /// Reparameterized draw: derivatives flow from the result to the parameters.
    fn rsample<R: Rng + ?Sized>(&self, sample_shape: &[usize], rng: &mut R) -> Result<ArrayD<S>>;

    /// Draw with the derivative graph cut.
    fn sample<R: Rng + ?Sized>(&self, sample_shape: &[usize], rng: &mut R) -> Result<ArrayD<S>> {
        Ok(self.rsample(sample_shape, rng)?.mapv(S::detach))
    }

    /// Log density at `value`, broadcast against the batch shape.
    fn log_prob(&self, value: &ArrayD<S>) -> Result<ArrayD<S>>;

    /// Cumulative distribution at `value`, broadcast against the batch shape.
    fn cdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>>;

    /// Inverse cumulative distribution at probabilities `value`.
    fn icdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>>;

    /// Mean per batch element.
    fn mean(&self) -> &ArrayD<S>;

    /// Variance per batch element.
    fn variance(&self) -> &ArrayD<S>;

    /// Entropy per batch element.
    fn entropy(&self) -> &ArrayD<S>;

    /// Standard deviation per batch element.
    fn stddev(&self) -> ArrayD<S> {
        self.variance().mapv(S::sqrt)
    }

    /// A new instance with parameters broadcast to `batch_shape`.
    fn expand(&self, batch_shape: &[usize]) -> Result<Self>;
}

/// Moments computed on first access, then reused.
#[derive(Debug, Clone)]
pub(crate) struct LazyMoments<S> {
    pub(crate) mean: OnceLock<ArrayD<S>>,
    pub(crate) variance: OnceLock<ArrayD<S>>,
    pub(crate) entropy: OnceLock<ArrayD<S>>,
}

impl<S> LazyMoments<S> {
    pub(crate) fn new() -> Self {
        Self { mean: OnceLock::new(), variance: OnceLock::new(), entropy: OnceLock::new() }
    }
}
