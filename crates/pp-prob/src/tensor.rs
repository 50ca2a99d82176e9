//! Small `ndarray` helpers shared by the distributions.
//!
//! Parameters and values are dynamic-rank arrays (`ArrayD<S>`). Broadcasting
//! itself is done by `ndarray`; these helpers only turn a failed broadcast
//! into a [`pp_core::Error`] and build common arrays.

use ndarray::{Array1, ArrayD, ArrayViewD, IxDyn};
use pp_ad::Scalar;
use pp_core::{Error, Result, shape};

/// A 0-dimensional array holding `value`.
pub fn scalar<S: Scalar>(value: S) -> ArrayD<S> {
    ArrayD::from_elem(IxDyn(&[]), value)
}

/// A 1-dimensional array from `values`.
pub fn vector<S: Scalar>(values: Vec<S>) -> ArrayD<S> {
    Array1::from(values).into_dyn()
}

/// The single element of a one-element array (any rank).
pub fn item<S: Scalar>(array: &ArrayD<S>) -> Option<S> {
    if array.len() == 1 { array.iter().next().copied() } else { None }
}

/// Lift an `f64` array into `S` (zero tangent for AD scalars).
pub fn lift<S: Scalar>(values: &ArrayD<f64>) -> ArrayD<S> {
    values.mapv(S::from_f64)
}

/// Broadcast view of `array` with shape `shape`.
pub fn broadcast_to<'a, S>(array: &'a ArrayD<S>, shape: &[usize]) -> Result<ArrayViewD<'a, S>> {
    array
        .broadcast(IxDyn(shape))
        .ok_or_else(|| Error::ShapeMismatch { lhs: array.shape().to_vec(), rhs: shape.to_vec() })
}

/// Shape of `value` broadcast against a distribution's batch shape.
pub fn value_shape<S>(value: &ArrayD<S>, batch_shape: &[usize]) -> Result<Vec<usize>> {
    shape::broadcast_pair(value.shape(), batch_shape)
}

/// Reject probabilities outside `[0, 1]` (NaN included).
pub fn check_probabilities<S: Scalar>(probs: &ArrayD<S>) -> Result<()> {
    match probs.iter().find(|p| !(0.0..=1.0).contains(&p.value())) {
        None => Ok(()),
        Some(p) => Err(Error::Validation(format!(
            "icdf requires probabilities in [0, 1], got {}",
            p.value()
        ))),
    }
}
