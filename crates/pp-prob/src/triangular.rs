//! Triangular distribution with lower limit `low`, upper limit `high` and mode `peak`.
//!
//! # Definition
//!
//! ```text
//! pdf(x) = 2 (x - low)  / ((high - low) (peak - low))   low  <= x <= peak
//!        = 2 (high - x) / ((high - low) (high - peak))  peak <  x <= high
//! ```
//!
//! Outside `[low, high]` the density is floored at [`SUPPORT_FLOOR`] instead
//! of 0, so `log_prob` stays finite for out-of-support values.
//!
//! Sampling is reparameterized: `u ~ U[0, 1)` from the internal standard
//! [`Uniform`] is pushed through the inverse CDF, so with `S = Dual` a draw
//! carries its derivative with respect to the parameters.
//!
//! The entropy is `0.5 - ln 2 + ln(high - low)`. It does not depend on
//! `peak` and is not the exact differential entropy of the family.
//!
//! `peak == low` or `peak == high` is valid, but makes one leg of the density
//! and CDF divide by zero; those evaluations follow IEEE semantics.

use std::f64::consts::LN_2;

use ndarray::{ArrayD, Zip};
use pp_ad::Scalar;
use pp_core::{Error, Result, Violation, config, shape};
use rand::Rng;

use crate::distribution::{Distribution, LazyMoments};
use crate::tensor;
use crate::uniform::Uniform;

/// Density assigned to values outside `[low, high]`.
pub const SUPPORT_FLOOR: f64 = 1e-6;

/// Batched triangular distribution.
#[derive(Debug, Clone)]
pub struct Triangular<S: Scalar = f64> {
    low: ArrayD<S>,
    high: ArrayD<S>,
    peak: ArrayD<S>,
    batch_shape: Vec<usize>,
    validate_args: bool,
    uniform: Uniform<f64>,
    moments: LazyMoments<S>,
}

impl<S: Scalar> Triangular<S> {
    /// Array-parameterized triangular; validation follows
    /// [`config::default_validate_args`].
    pub fn new(low: ArrayD<S>, high: ArrayD<S>, peak: ArrayD<S>) -> Result<Self> {
        Self::with_validation(low, high, peak, config::default_validate_args())
    }

    /// Array-parameterized triangular with an explicit validation flag.
    ///
    /// The three parameters are broadcast to a common batch shape.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the parameters do not broadcast.
    /// - `InvalidParameter` (when validating) naming the first failed check,
    ///   in order: `low >= high`, `peak < low`, `peak > high`.
    pub fn with_validation(
        low: ArrayD<S>,
        high: ArrayD<S>,
        peak: ArrayD<S>,
        validate_args: bool,
    ) -> Result<Self> {
        let batch_shape = shape::broadcast_shapes(&[low.shape(), high.shape(), peak.shape()])?;
        let low = tensor::broadcast_to(&low, &batch_shape)?.to_owned();
        let high = tensor::broadcast_to(&high, &batch_shape)?.to_owned();
        let peak = tensor::broadcast_to(&peak, &batch_shape)?.to_owned();

        let dist = Self {
            low,
            high,
            peak,
            batch_shape,
            validate_args,
            uniform: Uniform::standard(),
            moments: LazyMoments::new(),
        };
        if validate_args {
            dist.check_params()?;
        }
        tracing::debug!(batch_shape = ?dist.batch_shape, validate_args, "triangular constructed");
        Ok(dist)
    }

    /// Scalar-parameterized triangular; the batch shape is empty.
    pub fn from_scalars(low: S, high: S, peak: S) -> Result<Self> {
        Self::from_scalars_with_validation(low, high, peak, config::default_validate_args())
    }

    /// Scalar-parameterized triangular with an explicit validation flag.
    pub fn from_scalars_with_validation(
        low: S,
        high: S,
        peak: S,
        validate_args: bool,
    ) -> Result<Self> {
        Self::with_validation(
            tensor::scalar(low),
            tensor::scalar(high),
            tensor::scalar(peak),
            validate_args,
        )
    }

    fn check_params(&self) -> Result<()> {
        let violation = if !Zip::from(&self.low).and(&self.high).all(|l, h| l < h) {
            Some(Violation::LowNotBelowHigh)
        } else if !Zip::from(&self.low).and(&self.peak).all(|l, p| l <= p) {
            Some(Violation::PeakBelowLow)
        } else if !Zip::from(&self.peak).and(&self.high).all(|p, h| p <= h) {
            Some(Violation::PeakAboveHigh)
        } else {
            None
        };
        match violation {
            None => Ok(()),
            Some(violation) => {
                tracing::debug!(%violation, "triangular parameters rejected");
                Err(Error::InvalidParameter { distribution: "Triangular", violation })
            }
        }
    }

    /// Lower limit, broadcast to the batch shape.
    pub fn low(&self) -> &ArrayD<S> {
        &self.low
    }

    /// Upper limit, broadcast to the batch shape.
    pub fn high(&self) -> &ArrayD<S> {
        &self.high
    }

    /// Mode, broadcast to the batch shape.
    pub fn peak(&self) -> &ArrayD<S> {
        &self.peak
    }

    /// `exp(log_prob(value))`.
    pub fn prob(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        Ok(self.log_prob(value)?.mapv(S::exp))
    }

    /// Whether each value lies in the closed support `[low, high]`.
    pub fn support_contains(&self, value: &ArrayD<S>) -> Result<ArrayD<bool>> {
        let shape = tensor::value_shape(value, &self.batch_shape)?;
        let x = tensor::broadcast_to(value, &shape)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        Ok(Zip::from(x).and(low).and(high).map_collect(|x, l, h| l <= x && x <= h))
    }

    /// Apply `kernel(x, low, high, peak)` elementwise over `value` broadcast
    /// against the batch shape.
    fn map_value<F>(&self, value: &ArrayD<S>, kernel: F) -> Result<ArrayD<S>>
    where
        F: Fn(S, S, S, S) -> S,
    {
        let shape = tensor::value_shape(value, &self.batch_shape)?;
        let x = tensor::broadcast_to(value, &shape)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        let peak = tensor::broadcast_to(&self.peak, &shape)?;
        Ok(Zip::from(x)
            .and(low)
            .and(high)
            .and(peak)
            .map_collect(|&x, &l, &h, &p| kernel(x, l, h, p)))
    }
}

/// Inverse CDF at `u`, the reparameterized sampling transform.
///
/// Both legs are evaluated and one is selected, so a degenerate leg
/// (`peak == low` or `peak == high`) never raises.
#[inline]
pub fn inverse_cdf<S: Scalar>(u: S, low: S, high: S, peak: S) -> S {
    let one = S::from_f64(1.0);
    let interval = high - low;
    let left = low + (u * interval * (peak - low)).sqrt();
    let right = high - ((one - u) * interval * (high - peak)).sqrt();
    if u < (peak - low) / interval { left } else { right }
}

/// Log density at `x`, with the out-of-support floor.
///
/// `x == low` stays on the left leg and evaluates `ln(0)`.
#[inline]
pub fn log_density<S: Scalar>(x: S, low: S, high: S, peak: S) -> S {
    let ln2 = S::from_f64(LN_2);
    let interval = high - low;
    let left = ln2 + (x - low).ln() - interval.ln() - (peak - low).ln();
    let right = ln2 + (high - x).ln() - interval.ln() - (high - peak).ln();
    let inside = if x >= low && x <= peak { left } else { right };
    if x < low || x > high { S::from_f64(SUPPORT_FLOOR.ln()) } else { inside }
}

/// Cumulative distribution at `x`.
///
/// The interior formula is selected first, then `x <= low` forces 0, then
/// `x >= high` forces 1; the last clamp wins at shared boundaries.
#[inline]
pub fn cumulative<S: Scalar>(x: S, low: S, high: S, peak: S) -> S {
    let (zero, one) = (S::from_f64(0.0), S::from_f64(1.0));
    let interval = high - low;
    let left = (x - low).powi(2) / (interval * (peak - low));
    let right = one - (high - x).powi(2) / (interval * (high - peak));
    let inside = if x > low && x <= peak { left } else { right };
    let below_low = if x <= low { zero } else { inside };
    if x >= high { one } else { below_low }
}

impl<S: Scalar> Distribution<S> for Triangular<S> {
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
        tracing::trace!(shape = ?shape, "triangular rsample");
        let u: ArrayD<f64> = self.uniform.rsample(&shape, rng)?;
        let low = tensor::broadcast_to(&self.low, &shape)?;
        let high = tensor::broadcast_to(&self.high, &shape)?;
        let peak = tensor::broadcast_to(&self.peak, &shape)?;
        Ok(Zip::from(&u)
            .and(low)
            .and(high)
            .and(peak)
            .map_collect(|&u, &l, &h, &p| inverse_cdf(S::from_f64(u), l, h, p)))
    }

    fn log_prob(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        self.map_value(value, log_density)
    }

    fn cdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        self.map_value(value, cumulative)
    }

    /// # Errors
    /// `Validation` for probabilities outside `[0, 1]` when this instance
    /// validates its arguments.
    fn icdf(&self, value: &ArrayD<S>) -> Result<ArrayD<S>> {
        if self.validate_args {
            tensor::check_probabilities(value)?;
        }
        self.map_value(value, inverse_cdf)
    }

    fn mean(&self) -> &ArrayD<S> {
        self.moments.mean.get_or_init(|| {
            Zip::from(&self.low)
                .and(&self.high)
                .and(&self.peak)
                .map_collect(|&l, &h, &p| (l + h + p) / S::from_f64(3.0))
        })
    }

    fn variance(&self) -> &ArrayD<S> {
        self.moments.variance.get_or_init(|| {
            Zip::from(&self.low).and(&self.high).and(&self.peak).map_collect(|&l, &h, &p| {
                (l * l + h * h + p * p - l * h - l * p - h * p) / S::from_f64(18.0)
            })
        })
    }

    fn entropy(&self) -> &ArrayD<S> {
        self.moments.entropy.get_or_init(|| {
            let base = S::from_f64(0.5 - LN_2);
            Zip::from(&self.low).and(&self.high).map_collect(|&l, &h| base + (h - l).ln())
        })
    }

    /// Broadcast the parameters to `batch_shape`.
    ///
    /// The new instance skips validation at construction and then takes over
    /// this instance's `validate_args` flag.
    fn expand(&self, batch_shape: &[usize]) -> Result<Self> {
        shape::check_expand(&self.batch_shape, batch_shape)?;
        let low = tensor::broadcast_to(&self.low, batch_shape)?.to_owned();
        let high = tensor::broadcast_to(&self.high, batch_shape)?.to_owned();
        let peak = tensor::broadcast_to(&self.peak, batch_shape)?.to_owned();
        let mut expanded = Self::with_validation(low, high, peak, false)?;
        expanded.validate_args = self.validate_args;
        tracing::debug!(from = ?self.batch_shape, to = ?batch_shape, "triangular expanded");
        Ok(expanded)
    }
}
