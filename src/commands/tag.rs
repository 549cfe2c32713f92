//! Tag command
//!
//! Tag the gem's version and push commits and tags. A failed push removes the
//! tag it just created.

use super::{
    CliError, Command, Context, FORCE_TAG, Io, RepoCommand, SpecCommand, StepError, command_help,
    force_tag_option, puts,
};
use crate::args::ArgParser;
use crate::git_repo::{GitRepo, GitRepoError};

#[derive(Debug)]
pub struct TagCommand {
    parser: ArgParser,
    repo: RepoCommand,
    spec: SpecCommand,
}

impl TagCommand {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        Ok(Self {
            parser: force_tag_option(ArgParser::new()),
            repo: RepoCommand::new(ctx),
            spec: SpecCommand::new(ctx)?,
        })
    }

    fn validate(&self, io: &mut Io<'_>) -> Result<(), CliError> {
        let validated = self
            .repo
            .cmd(io, GitRepo::run_validate_clean_cmd)
            .and_then(|()| self.repo.cmd(io, GitRepo::run_validate_committed_cmd));

        match validated {
            Ok(()) => Ok(()),
            Err(StepError::Io(err)) => Err(CliError::Io(err)),
            Err(StepError::Failed(_)) => {
                puts(io.err, "There are files that need to be committed first.")?;
                if !self.parser.flag(FORCE_TAG) {
                    return Err(CliError::CommandExit);
                }
                puts(io.err, "Forcing tag anyway...")?;
                Ok(())
            }
        }
    }

    fn tag_and_push(&self, io: &mut Io<'_>) -> Result<(), StepError<GitRepoError>> {
        let spec = self.spec.spec();
        let version = spec.version();
        let tag = spec.version_tag();

        self.repo
            .cmd(io, |repo| repo.run_add_version_tag_cmd(version, tag))?;
        puts(io.out, &format!("Tagged {tag}."))?;

        if let Err(pushed) = self.repo.cmd(io, GitRepo::run_push_cmd) {
            crate::debug!("push failed, removing tag {tag}");
            self.repo.cmd(io, |repo| repo.run_rm_tag_cmd(tag))?;
            return Err(pushed);
        }
        puts(io.out, "Pushed git commits and tags.")?;

        Ok(())
    }
}

impl Command for TagCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;
        self.validate(io)?;
        self.tag_and_push(io).map_err(|err| err.narrow(io))
    }

    fn summary(&self) -> String {
        format!(
            "Tag {} and push git commits/tags",
            self.spec.spec().version_tag()
        )
    }

    fn help(&self) -> String {
        command_help("tag [options]", &self.parser, &self.summary())
    }
}
