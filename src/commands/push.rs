//! Push command
//!
//! Build the gem, then push it to its push host

use super::{BuildCommand, CliError, Command, Context, Io, SpecCommand, command_help, puts};
use crate::args::ArgParser;
use crate::gemspec::Gemspec;

#[derive(Debug)]
pub struct PushCommand {
    parser: ArgParser,
    spec: SpecCommand,
    build: Box<dyn Command>,
}

impl PushCommand {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        let build = BuildCommand::new(ctx)?;
        Self::with_build(ctx, Box::new(build))
    }

    /// Push using the given command for the build step.
    pub fn with_build(ctx: &Context, build: Box<dyn Command>) -> Result<Self, CliError> {
        Ok(Self {
            parser: ArgParser::new(),
            spec: SpecCommand::new(ctx)?,
            build,
        })
    }
}

impl Command for PushCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;
        self.build.run(&[], io)?;

        let spec = self.spec.spec();
        puts(
            io.out,
            &format!("Pushing {} to {}...", spec.gem_file_name(), spec.push_host()),
        )?;
        let received = format!("{} received.", spec.gem_file_name());
        self.spec.notify(io, &received, Gemspec::run_push_cmd)
    }

    fn summary(&self) -> String {
        let spec = self.spec.spec();
        format!("Push built {} to {}", spec.gem_file_name(), spec.push_host())
    }

    fn help(&self) -> String {
        command_help("push [options]", &self.parser, &self.summary())
    }
}
