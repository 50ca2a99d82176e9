//! Broadcast rules for batch and sample shapes.
//!
//! Shapes are right-aligned; a dimension of size 1 stretches to match the
//! other operand. These helpers only compute shapes; the arrays themselves
//! are broadcast by `ndarray`.

use crate::{Error, Result};

/// Broadcast two shapes.
pub fn broadcast_pair(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut out = vec![0usize; ndim];
    for i in 0..ndim {
        // Walk from the trailing axis; missing leading axes behave as size 1.
        let a = if i < lhs.len() { lhs[lhs.len() - 1 - i] } else { 1 };
        let b = if i < rhs.len() { rhs[rhs.len() - 1 - i] } else { 1 };
        out[ndim - 1 - i] = if a == b {
            a
        } else if a == 1 {
            b
        } else if b == 1 {
            a
        } else {
            return Err(Error::ShapeMismatch { lhs: lhs.to_vec(), rhs: rhs.to_vec() });
        };
    }
    Ok(out)
}

/// Broadcast any number of shapes to their common shape.
///
/// An empty input broadcasts to the scalar shape `[]`.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    shapes.iter().try_fold(Vec::new(), |acc, s| broadcast_pair(&acc, s))
}

/// `sample_shape ++ batch_shape ++ event_shape`.
pub fn extended_shape(
    sample_shape: &[usize],
    batch_shape: &[usize],
    event_shape: &[usize],
) -> Vec<usize> {
    let mut out = Vec::with_capacity(sample_shape.len() + batch_shape.len() + event_shape.len());
    out.extend_from_slice(sample_shape);
    out.extend_from_slice(batch_shape);
    out.extend_from_slice(event_shape);
    out
}

/// Check that `to` is a valid expansion target for `from`.
///
/// `to` may add leading dimensions; every trailing dimension of `from` must
/// either equal the matching one in `to` or be 1.
pub fn check_expand(from: &[usize], to: &[usize]) -> Result<()> {
    let fits = to.len() >= from.len()
        && from.iter().rev().zip(to.iter().rev()).all(|(&f, &t)| f == t || f == 1);
    if fits { Ok(()) } else { Err(Error::ExpandShape { from: from.to_vec(), to: to.to_vec() }) }
}
