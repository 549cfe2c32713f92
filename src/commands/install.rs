//! Install command
//!
//! Build the gem, then install it into the system gems

use super::{BuildCommand, CliError, Command, Context, Io, SpecCommand, command_help};
use crate::args::ArgParser;
use crate::gemspec::Gemspec;

#[derive(Debug)]
pub struct InstallCommand {
    parser: ArgParser,
    spec: SpecCommand,
    build: Box<dyn Command>,
}

impl InstallCommand {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        let build = BuildCommand::new(ctx)?;
        Self::with_build(ctx, Box::new(build))
    }

    /// Install using the given command for the build step.
    pub fn with_build(ctx: &Context, build: Box<dyn Command>) -> Result<Self, CliError> {
        Ok(Self {
            parser: ArgParser::new(),
            spec: SpecCommand::new(ctx)?,
            build,
        })
    }
}

impl Command for InstallCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;
        self.build.run(&[], io)?;

        let spec = self.spec.spec();
        let installed = format!(
            "{} {} installed to system gems",
            spec.name(),
            spec.version()
        );
        self.spec.notify(io, &installed, Gemspec::run_install_cmd)
    }

    fn summary(&self) -> String {
        format!(
            "Build and install {} into system gems",
            self.spec.spec().gem_file_name()
        )
    }

    fn help(&self) -> String {
        command_help("install [options]", &self.parser, &self.summary())
    }
}
