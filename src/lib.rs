//! ggem internal library code

pub mod args;
pub mod cli;
pub mod command_set;
pub mod commands;
pub mod config;
pub mod debug;
pub mod env_vars;
pub mod gem;
pub mod gemspec;
pub mod git_repo;
pub mod paths;
pub mod shell;
pub mod template;

#[cfg(test)]
pub mod test_utils;

// Re-export common types for convenience
pub use args::ArgParser;
pub use cli::Cli;
pub use command_set::CommandSet;
pub use commands::{CliError, Command, Context, Io};
pub use config::Config;
pub use debug::{debug_log, debug_logf, init_debug, is_debug_enabled};
pub use gem::{Gem, GemError, normalize_name};
pub use gemspec::{DEFAULT_PUSH_HOST, Gemspec, GemspecError};
pub use git_repo::{GitRepo, GitRepoError};
pub use paths::find_gemspec_in;
pub use shell::{CmdError, CmdResult, CmdRunner, SystemRunner};
