//! Error types for the distribution workspace

use std::fmt;

use thiserror::Error;

/// Which parameter constraint a distribution rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `low < high` failed for at least one batch element.
    LowNotBelowHigh,
    /// `low <= peak` failed for at least one batch element.
    PeakBelowLow,
    /// `peak <= high` failed for at least one batch element.
    PeakAboveHigh,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Violation::LowNotBelowHigh => "low >= high",
            Violation::PeakBelowLow => "peak < low",
            Violation::PeakAboveHigh => "peak > high",
        };
        f.write_str(s)
    }
}

/// Workspace error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Distribution parameters violate a construction-time constraint
    #[error("{distribution} is not defined when {violation}")]
    InvalidParameter {
        /// Distribution name, e.g. `"Triangular"`.
        distribution: &'static str,
        /// The constraint that failed.
        violation: Violation,
    },

    /// Two shapes cannot be broadcast together
    #[error("shape mismatch: {lhs:?} and {rhs:?} are not broadcastable")]
    ShapeMismatch {
        /// Left operand shape.
        lhs: Vec<usize>,
        /// Right operand shape.
        rhs: Vec<usize>,
    },

    /// `expand` target is not a broadcast of the current batch shape
    #[error("cannot expand batch shape {from:?} to {to:?}")]
    ExpandShape {
        /// Current batch shape.
        from: Vec<usize>,
        /// Requested batch shape.
        to: Vec<usize>,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// The rejected constraint, if this is an [`Error::InvalidParameter`].
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Error::InvalidParameter { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
