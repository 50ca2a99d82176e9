//! Reparameterizable probability distributions for pp.
//!
//! This crate hosts batched distributions over `ndarray` arrays:
//! - [`Triangular`]: three-parameter triangular family with reparameterized
//!   sampling, floored log-density and cached moments
//! - [`Uniform`]: `U(low, high)`, also the randomness source for sampling
//! - JSON configs ([`config::TriangularConfig`])
//!
//! Every operation is generic over [`pp_ad::Scalar`], so running with
//! `S = pp_ad::Dual` yields derivatives of draws and densities with respect to
//! the parameters.

pub mod config;
pub mod distribution;
pub mod tensor;
pub mod triangular;
pub mod uniform;

pub use distribution::Distribution;
pub use triangular::Triangular;
pub use uniform::Uniform;
