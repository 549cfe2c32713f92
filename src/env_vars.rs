//! Environment variable handling.
//!
//! These are read once, in `main`, and folded into [`crate::config::Config`].
//! Nothing below the entry point consults the environment directly.

use std::env;

/// Enables echoing of shell commands and their raw output.
pub const DEBUG_VAR: &str = "DEBUG";

/// Overrides any configured or default gem push host.
pub const PUSH_HOST_VAR: &str = "GGEM_PUSH_HOST";

// Any non-empty value turns a flag on, matching how the shell treats `DEBUG=1`.
fn is_set(var: &str) -> bool {
    env::var(var).ok().is_some_and(|s| !s.is_empty())
}

/// Whether `DEBUG` is set.
pub fn debug() -> bool {
    is_set(DEBUG_VAR)
}

/// Get the push host override from `GGEM_PUSH_HOST` (returns None if unset or empty).
pub fn push_host() -> Option<String> {
    env::var(PUSH_HOST_VAR).ok().filter(|s| !s.is_empty())
}
