//! JSON configuration for triangular distributions.
//!
//! ```json
//! { "low": 0.0, "high": [1.0, 2.0], "peak": 0.5, "validate_args": true }
//! ```

use std::path::Path;

use ndarray::ArrayD;
use pp_ad::Scalar;
use pp_core::Result;
use serde::{Deserialize, Serialize};

use crate::tensor;
use crate::triangular::Triangular;

/// A parameter given either as a single number or as a 1-D list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Plain number.
    Scalar(f64),
    /// One value per batch element.
    Array(Vec<f64>),
}

impl ParamValue {
    /// The plain number, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(v) => Some(*v),
            ParamValue::Array(_) => None,
        }
    }

    /// Convert to an array: 0-d for a number, 1-D for a list.
    pub fn to_array<S: Scalar>(&self) -> ArrayD<S> {
        match self {
            ParamValue::Scalar(v) => tensor::scalar(S::from_f64(*v)),
            ParamValue::Array(v) => tensor::vector(v.iter().map(|&x| S::from_f64(x)).collect()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        ParamValue::Array(v)
    }
}

/// Parameters of a [`Triangular`] distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriangularConfig {
    /// Lower limit.
    pub low: ParamValue,
    /// Upper limit.
    pub high: ParamValue,
    /// Mode.
    pub peak: ParamValue,
    /// Overrides the process-wide validation default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_args: Option<bool>,
}

impl TriangularConfig {
    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading triangular config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Construct the distribution these parameters describe.
    ///
    /// All-scalar configs go through the scalar constructors and get an empty
    /// batch shape; any list makes the parameters broadcast.
    pub fn build<S: Scalar>(&self) -> Result<Triangular<S>> {
        let validate_args = pp_core::config::resolve_validate_args(self.validate_args);
        match (self.low.as_scalar(), self.high.as_scalar(), self.peak.as_scalar()) {
            (Some(low), Some(high), Some(peak)) => Triangular::from_scalars_with_validation(
                S::from_f64(low),
                S::from_f64(high),
                S::from_f64(peak),
                validate_args,
            ),
            _ => Triangular::with_validation(
                self.low.to_array(),
                self.high.to_array(),
                self.peak.to_array(),
                validate_args,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use pp_core::{Error, Violation};

    #[test]
    fn test_parse_scalars() {
        let cfg = TriangularConfig::from_json_str(r#"{"low": 0, "high": 1, "peak": 0.5}"#).unwrap();
        assert_eq!(cfg.low, ParamValue::Scalar(0.0));
        assert_eq!(cfg.validate_args, None);
        let d = cfg.build::<f64>().unwrap();
        assert!(d.batch_shape().is_empty());
    }

    #[test]
    fn test_parse_mixed_broadcasts() {
        let cfg = TriangularConfig::from_json_str(
            r#"{"low": 0.0, "high": [1.0, 2.0], "peak": 0.5, "validate_args": false}"#,
        )
        .unwrap();
        assert_eq!(cfg.high, ParamValue::Array(vec![1.0, 2.0]));
        let d = cfg.build::<f64>().unwrap();
        assert_eq!(d.batch_shape(), &[2]);
        assert!(!d.validate_args());
    }

    #[test]
    fn test_build_reports_violation() {
        let cfg = TriangularConfig {
            low: 0.0.into(),
            high: 1.0.into(),
            peak: 2.0.into(),
            validate_args: Some(true),
        };
        let err = cfg.build::<f64>().unwrap_err();
        assert_eq!(err.violation(), Some(Violation::PeakAboveHigh));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err =
            TriangularConfig::from_json_str(r#"{"low": 0, "high": 1, "peak": 0.5, "mode": 1}"#)
                .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("pp-prob-no-such-config.json");
        let err = TriangularConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = TriangularConfig {
            low: vec![0.0, 1.0].into(),
            high: 3.0.into(),
            peak: 2.0.into(),
            validate_args: None,
        };
        let json = cfg.to_json_string().unwrap();
        assert!(!json.contains("validate_args"));
        assert_eq!(TriangularConfig::from_json_str(&json).unwrap(), cfg);
    }
}
