//! # pp-ad
//!
//! Automatic differentiation (AD) primitives for the distribution crates.
//!
//! Provides:
//! - **Forward-mode AD** via [`dual::Dual`] numbers, used to differentiate
//!   reparameterized samples and densities with respect to distribution
//!   parameters
//! - [`Scalar`] trait for writing generic code over `f64` and `Dual`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dual;
pub mod scalar;

pub use dual::Dual;
pub use scalar::Scalar;
