//! Per-command argument parsing
//!
//! Each command owns an [`ArgParser`] describing its boolean options. Parsing
//! collects the remaining tokens as positional arguments. `-h/--help` and
//! `-v/--version` short-circuit as [`CliError::HelpExit`] and
//! [`CliError::VersionExit`] instead of failing.

use crate::commands::CliError;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction};
use std::collections::HashMap;
use std::fmt;

const ARGS: &str = "args";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptionSpec {
    name: &'static str,
    abbrev: char,
    description: &'static str,
}

/// Option schema plus the result of the last parse
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    options: Vec<OptionSpec>,
    args: Vec<String>,
    flags: HashMap<String, bool>,
}

impl ArgParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a boolean `--<name>` / `-<abbrev>` option.
    #[must_use]
    pub fn option(mut self, name: &'static str, description: &'static str, abbrev: char) -> Self {
        self.options.push(OptionSpec {
            name,
            abbrev,
            description,
        });
        self
    }

    /// Parse `argv`, replacing the results of any earlier parse.
    pub fn parse(&mut self, argv: &[String]) -> Result<(), CliError> {
        let matches = self
            .command()
            .try_get_matches_from(argv)
            .map_err(|err| match err.kind() {
                ErrorKind::DisplayHelp => CliError::HelpExit,
                ErrorKind::DisplayVersion => CliError::VersionExit,
                _ => CliError::Parse(parse_message(&err)),
            })?;

        self.args = matches
            .get_many::<String>(ARGS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        self.flags = self
            .options
            .iter()
            .map(|opt| (opt.name.to_string(), matches.get_flag(opt.name)))
            .collect();

        Ok(())
    }

    /// Positional arguments from the last parse
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether a boolean option was given in the last parse
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    fn command(&self) -> clap::Command {
        let mut command = clap::Command::new(clap::crate_name!())
            .version(clap::crate_version!())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new("version")
                    .short('v')
                    .long("version")
                    .action(ArgAction::Version),
            )
            .arg(
                Arg::new("help")
                    .short('h')
                    .long("help")
                    .action(ArgAction::Help),
            )
            .arg(Arg::new(ARGS).num_args(0..).action(ArgAction::Append));

        for opt in &self.options {
            command = command.arg(
                Arg::new(opt.name)
                    .short(opt.abbrev)
                    .long(opt.name)
                    .help(opt.description)
                    .action(ArgAction::SetTrue),
            );
        }

        command
    }
}

// clap's rendered error leads with "error: " and trails usage hints.
fn parse_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

impl fmt::Display for ArgParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<(String, &str)> = self
            .options
            .iter()
            .map(|opt| (format!("-{}, --{}", opt.abbrev, opt.name), opt.description))
            .collect();
        rows.push(("-v, --version".to_string(), ""));
        rows.push(("-h, --help".to_string(), ""));

        let width = rows.iter().map(|(switches, _)| switches.len()).max().unwrap_or(0);

        writeln!(f)?;
        for (switches, description) in rows {
            if description.is_empty() {
                writeln!(f, "    {switches}")?;
            } else {
                writeln!(f, "    {switches:<width$}  {description}")?;
            }
        }
        Ok(())
    }
}
