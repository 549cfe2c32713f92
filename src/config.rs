//! Runtime configuration
//!
//! Resolved once at startup and threaded into every command constructor.

use crate::env_vars;

/// Settings that influence how commands run and report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Echo shell commands and their raw output to stdout
    pub debug: bool,

    /// Push host that wins over gemspec metadata and the default host
    pub push_host: Option<String>,
}

impl Config {
    /// Build the configuration from `DEBUG` and `GGEM_PUSH_HOST`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debug: env_vars::debug(),
            push_host: env_vars::push_host(),
        }
    }

    /// Same configuration with debug echoing switched on or off.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Same configuration with a push host override.
    #[must_use]
    pub fn with_push_host(mut self, host: impl Into<String>) -> Self {
        self.push_host = Some(host.into());
        self
    }
}
