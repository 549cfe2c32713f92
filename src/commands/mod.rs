//! Commands and the capabilities they are composed from
//!
//! Every command owns an [`ArgParser`]. Commands that shell out hold a
//! [`Notifier`], either directly or through one of the collaborator handles:
//!
//! - [`RepoCommand`] binds a [`GitRepo`] to the working directory and narrows
//!   repository command failures into [`CliError::CommandExit`].
//! - [`SpecCommand`] loads the [`Gemspec`] from the working directory, failing
//!   construction when there is none, and narrows spec command failures the
//!   same way.
//! - [`force_tag_option`] adds `--force-tag` to a parser.

pub mod build;
pub mod generate;
pub mod install;
pub mod invalid;
pub mod push;
pub mod release;
pub mod tag;

pub use build::BuildCommand;
pub use generate::GenerateCommand;
pub use install::InstallCommand;
pub use invalid::InvalidCommand;
pub use push::PushCommand;
pub use release::ReleaseCommand;
pub use tag::TagCommand;

use crate::args::ArgParser;
use crate::config::Config;
use crate::gemspec::{Gemspec, GemspecError};
use crate::git_repo::{GitRepo, GitRepoError};
use crate::shell::{CmdResult, CmdRunner};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Name of the option that forces tagging over uncommitted changes
pub const FORCE_TAG: &str = "force-tag";

/// How a command run ends when it does not succeed.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("help requested")]
    HelpExit,

    #[error("version requested")]
    VersionExit,

    #[error("{0}")]
    Parse(String),

    #[error("`{0}` is not a command.")]
    InvalidCommand(String),

    #[error("{0}")]
    Argument(String),

    /// The failure was already reported where it happened.
    #[error("command exited")]
    CommandExit,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Everything a command is constructed from.
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
    pub runner: Rc<dyn CmdRunner>,
}

impl Context {
    pub fn new(cwd: impl Into<PathBuf>, config: Config, runner: Rc<dyn CmdRunner>) -> Self {
        Self {
            cwd: cwd.into(),
            config,
            runner,
        }
    }
}

/// Where a command writes its output.
pub struct Io<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl fmt::Debug for Io<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Io").finish_non_exhaustive()
    }
}

impl<'a> Io<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}

pub trait Command: fmt::Debug {
    fn run(&mut self, argv: &[String], io: &mut Io<'_>) -> Result<(), CliError>;

    /// One-line description for the command listing
    fn summary(&self) -> String {
        String::new()
    }

    fn help(&self) -> String;
}

/// Write `text` followed by a newline unless it already ends with one.
pub fn puts(w: &mut dyn Write, text: &str) -> io::Result<()> {
    w.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Help text shared by the gem commands
pub(crate) fn command_help(usage: &str, parser: &ArgParser, description: &str) -> String {
    format!("Usage: ggem {usage}\n\nOptions: {parser}\nDescription:\n  {description}")
}

/// Adds the `--force-tag` / `-f` option.
#[must_use]
pub fn force_tag_option(parser: ArgParser) -> ArgParser {
    parser.option(FORCE_TAG, "force tagging even with uncommitted files", 'f')
}

/// A shell step that failed, or output that could not be written.
#[derive(Debug)]
pub enum StepError<E> {
    Failed(E),
    Io(io::Error),
}

impl<E> From<io::Error> for StepError<E> {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl<E: fmt::Display> StepError<E> {
    /// Report a failed step on stderr and turn it into a silent command exit.
    pub fn narrow(self, io: &mut Io<'_>) -> CliError {
        match self {
            Self::Failed(err) => match puts(io.err, &err.to_string()) {
                Ok(()) => CliError::CommandExit,
                Err(write_err) => CliError::Io(write_err),
            },
            Self::Io(err) => CliError::Io(err),
        }
    }
}

/// Runs shell steps, echoing each one when debugging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier {
    debug: bool,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            debug: config.debug,
        }
    }

    /// Run one step; in debug mode echo its command string and raw output.
    pub fn cmd<E>(
        self,
        io: &mut Io<'_>,
        step: impl FnOnce() -> Result<CmdResult, E>,
    ) -> Result<(), StepError<E>> {
        let result = step().map_err(StepError::Failed)?;
        if self.debug {
            puts(io.out, &result.command)?;
            puts(io.out, &result.stdout)?;
        }
        Ok(())
    }

    /// Run one step, then confirm it with `success`.
    pub fn notify<E>(
        self,
        io: &mut Io<'_>,
        success: &str,
        step: impl FnOnce() -> Result<CmdResult, E>,
    ) -> Result<(), StepError<E>> {
        self.cmd(io, step)?;
        puts(io.out, success)?;
        Ok(())
    }
}

/// A git repository handle for commands that work on the repo.
#[derive(Debug, Clone)]
pub struct RepoCommand {
    repo: GitRepo,
    notifier: Notifier,
    runner: Rc<dyn CmdRunner>,
}

impl RepoCommand {
    /// Bind to the context's working directory.
    pub fn new(ctx: &Context) -> Self {
        Self {
            repo: GitRepo::new(&ctx.cwd, ctx.runner.clone()),
            notifier: Notifier::new(&ctx.config),
            runner: ctx.runner.clone(),
        }
    }

    /// Same capability bound to another repository root.
    #[must_use]
    pub fn at(&self, path: &Path) -> Self {
        Self {
            repo: GitRepo::new(path, self.runner.clone()),
            notifier: self.notifier,
            runner: self.runner.clone(),
        }
    }

    #[must_use]
    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    /// Run a repo step without narrowing its failure.
    pub fn cmd(
        &self,
        io: &mut Io<'_>,
        step: impl FnOnce(&GitRepo) -> Result<CmdResult, GitRepoError>,
    ) -> Result<(), StepError<GitRepoError>> {
        self.notifier.cmd(io, || step(&self.repo))
    }

    pub fn notify(
        &self,
        io: &mut Io<'_>,
        success: &str,
        step: impl FnOnce(&GitRepo) -> Result<CmdResult, GitRepoError>,
    ) -> Result<(), CliError> {
        self.notifier
            .notify(io, success, || step(&self.repo))
            .map_err(|err| err.narrow(io))
    }
}

/// A gemspec handle for commands that build, install or push the gem.
#[derive(Debug, Clone)]
pub struct SpecCommand {
    spec: Gemspec,
    notifier: Notifier,
}

impl SpecCommand {
    /// Load the gemspec from the context's working directory.
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        let spec = Gemspec::new(
            &ctx.cwd,
            ctx.config.push_host.as_deref(),
            ctx.runner.clone(),
        )
        .map_err(|err| match err {
            GemspecError::NotFound { .. } => {
                CliError::Argument(format!("There are no gemspecs at {}", ctx.cwd.display()))
            }
            other => CliError::Argument(other.to_string()),
        })?;

        Ok(Self {
            spec,
            notifier: Notifier::new(&ctx.config),
        })
    }

    #[must_use]
    pub fn spec(&self) -> &Gemspec {
        &self.spec
    }

    pub fn notify(
        &self,
        io: &mut Io<'_>,
        success: &str,
        step: impl FnOnce(&Gemspec) -> Result<CmdResult, GemspecError>,
    ) -> Result<(), CliError> {
        self.notifier
            .notify(io, success, || step(&self.spec))
            .map_err(|err| err.narrow(io))
    }
}
