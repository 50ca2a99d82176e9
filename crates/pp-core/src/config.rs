//! Process-wide defaults shared by every distribution.
//!
//! Distributions built without an explicit validation flag consult
//! [`default_validate_args`]. The default is `true`.

use std::sync::atomic::{AtomicBool, Ordering};

static DEFAULT_VALIDATE_ARGS: AtomicBool = AtomicBool::new(true);

/// Set whether newly constructed distributions validate their parameters.
///
/// Already-built instances keep the flag they were created with.
pub fn set_default_validate_args(value: bool) {
    let previous = DEFAULT_VALIDATE_ARGS.swap(value, Ordering::Relaxed);
    if previous != value {
        tracing::debug!(validate_args = value, "default argument validation changed");
    }
}

/// Current process-wide validation default.
#[inline]
pub fn default_validate_args() -> bool {
    DEFAULT_VALIDATE_ARGS.load(Ordering::Relaxed)
}

/// Resolve an optional per-instance flag against the process default.
#[inline]
pub fn resolve_validate_args(explicit: Option<bool>) -> bool {
    explicit.unwrap_or_else(default_validate_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flag_wins() {
        assert!(resolve_validate_args(Some(true)));
        assert!(!resolve_validate_args(Some(false)));
    }

    #[test]
    fn test_default_is_enabled() {
        // Nothing in this crate's tests flips the global.
        assert!(default_validate_args());
        assert_eq!(resolve_validate_args(None), default_validate_args());
    }
}
