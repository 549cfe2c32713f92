//! Build command
//!
//! Build the gem from its gemspec into the `pkg` directory

use super::{CliError, Command, Context, Io, SpecCommand, command_help};
use crate::args::ArgParser;
use crate::gemspec::{BUILD_TO_DIRNAME, Gemspec};

#[derive(Debug)]
pub struct BuildCommand {
    parser: ArgParser,
    spec: SpecCommand,
}

impl BuildCommand {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        Ok(Self {
            parser: ArgParser::new(),
            spec: SpecCommand::new(ctx)?,
        })
    }
}

impl Command for BuildCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;

        let spec = self.spec.spec();
        let built = format!(
            "{} {} built to {}",
            spec.name(),
            spec.version(),
            spec.gem_file()
        );
        self.spec.notify(io, &built, Gemspec::run_build_cmd)
    }

    fn summary(&self) -> String {
        format!(
            "Build {} into the {BUILD_TO_DIRNAME} directory",
            self.spec.spec().gem_file_name()
        )
    }

    fn help(&self) -> String {
        command_help("build [options]", &self.parser, &self.summary())
    }
}
