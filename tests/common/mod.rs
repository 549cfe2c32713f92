//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `get_ggem_binary`)
//! - Gem and git fixture utilities (via `helpers`)

pub(crate) mod helpers;

// Re-export the helpers most tests reach for
pub(crate) use helpers::run_ggem;
