//! Generate command
//!
//! Scaffold a new gem and initialize its git repository

use super::{CliError, Command, Context, Io, RepoCommand, command_help, puts};
use crate::args::ArgParser;
use crate::gem::{Gem, GemError};
use crate::git_repo::GitRepo;
use std::path::PathBuf;

#[derive(Debug)]
pub struct GenerateCommand {
    parser: ArgParser,
    repo: RepoCommand,
    cwd: PathBuf,
}

impl GenerateCommand {
    pub fn new(ctx: &Context) -> Self {
        Self {
            parser: ArgParser::new(),
            repo: RepoCommand::new(ctx),
            cwd: ctx.cwd.clone(),
        }
    }
}

impl Command for GenerateCommand {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError> {
        self.parser.parse(argv)?;

        let name = self.parser.args().first().map_or("", String::as_str);
        let gem = Gem::new(&self.cwd, name).map_err(|err| match err {
            GemError::NoName => CliError::Argument("GEM-NAME must be provided".to_string()),
            other => CliError::Other(other.into()),
        })?;
        let path = gem.save().map_err(anyhow::Error::from)?.path();
        puts(io.out, &format!("created gem in {}", path.display()))?;

        self.repo
            .at(&path)
            .notify(io, "initialized gem git repo", GitRepo::run_init_cmd)
    }

    fn summary(&self) -> String {
        "Create a gem given a GEM-NAME".to_string()
    }

    fn help(&self) -> String {
        command_help("generate [options] GEM-NAME", &self.parser, &self.summary())
    }
}
