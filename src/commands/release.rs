//! Release command
//!
//! Run tag, then push

use super::{
    CliError, Command, Context, FORCE_TAG, Io, PushCommand, SpecCommand, TagCommand, command_help,
    force_tag_option,
};
use crate::args::ArgParser;

#[derive(Debug)]
pub struct ReleaseCommand {
    parser: ArgParser,
    spec: SpecCommand,
    tag: Box<dyn Command>,
    push: Box<dyn Command>,
}

impl ReleaseCommand {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        let tag = TagCommand::new(ctx)?;
        let push = PushCommand::new(ctx)?;
        Self::with_steps(ctx, Box::new(tag), Box::new(push))
    }

    /// Release using the given commands for the tag and push steps.
    pub fn with_steps(
        ctx: &Context,
        tag: Box<dyn Command>,
        push: Box<dyn Command>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            parser: force_tag_option(ArgParser::new()),
            spec: SpecCommand::new(ctx)?,
            tag,
            push,
        })
    }
}

impl Command for ReleaseCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;

        let tag_args = if self.parser.flag(FORCE_TAG) {
            vec![format!("--{FORCE_TAG}")]
        } else {
            Vec::new()
        };
        self.tag.run(&tag_args, io)?;
        self.push.run(&[], io)
    }

    fn summary(&self) -> String {
        let spec = self.spec.spec();
        format!(
            "Tag {} and push built {} to {}",
            spec.version_tag(),
            spec.gem_file_name(),
            spec.push_host()
        )
    }

    fn help(&self) -> String {
        let description = format!(
            "{}\n  (macro for running `ggem tag && ggem push`)",
            self.summary()
        );
        command_help("release [options]", &self.parser, &description)
    }
}
