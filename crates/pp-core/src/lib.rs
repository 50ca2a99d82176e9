//! # pp-core
//!
//! Shared foundation for the distribution crates: the workspace error type,
//! process-wide defaults, and the broadcast rules every distribution uses for
//! its batch shape.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod shape;

pub use error::{Error, Result, Violation};

/// Workspace version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
