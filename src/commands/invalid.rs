//! Fallback for names that are not commands

use super::{CliError, Command, Io};
use crate::args::ArgParser;

/// What runs when the command name is missing or unknown.
///
/// Built per lookup with the name that was tried and the command listing
/// to show in its help.
#[derive(Debug)]
pub struct InvalidCommand {
    name: Option<String>,
    parser: ArgParser,
    listing: String,
}

impl InvalidCommand {
    pub fn new(name: Option<&str>, listing: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            parser: ArgParser::new(),
            listing: listing.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Command for InvalidCommand {
    fn run(&mut self, argv: &[String], _io: &mut Io<'_>) -> Result<(), CliError> {
        let argv: Vec<String> = self.name.iter().chain(argv).cloned().collect();
        self.parser.parse(&argv)?;

        match self.name.as_deref() {
            None | Some("") => Err(CliError::HelpExit),
            Some(name) => Err(CliError::InvalidCommand(name.to_string())),
        }
    }

    fn help(&self) -> String {
        let commands: String = self
            .listing
            .lines()
            .map(|line| format!("  {line}\n"))
            .collect();
        format!(
            "Usage: ggem [COMMAND] [options]\n\nOptions: {}\nCommands:\n{commands}",
            self.parser
        )
    }
}
