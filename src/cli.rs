//! Top-level command dispatch
//!
//! Looks the first argument up in the registry, runs the command with the
//! rest, and turns the outcome into an exit code.

use crate::command_set::CommandSet;
use crate::commands::{
    BuildCommand, CliError, Command, Context, GenerateCommand, InstallCommand, InvalidCommand, Io,
    PushCommand, ReleaseCommand, TagCommand, puts,
};
use std::error::Error as _;
use std::io::{self, Write};

#[derive(Debug)]
pub struct Cli {
    commands: CommandSet,
}

impl Cli {
    /// Register every command that can be constructed in `ctx`.
    pub fn new(ctx: &Context) -> Self {
        let mut commands = CommandSet::new();
        commands.add(ctx, |ctx| Ok(Box::new(GenerateCommand::new(ctx))), "generate", &["g"]);
        commands.add(ctx, |ctx| Ok(Box::new(BuildCommand::new(ctx)?)), "build", &["b"]);
        commands.add(ctx, |ctx| Ok(Box::new(InstallCommand::new(ctx)?)), "install", &["i"]);
        commands.add(ctx, |ctx| Ok(Box::new(PushCommand::new(ctx)?)), "push", &["p"]);
        commands.add(ctx, |ctx| Ok(Box::new(TagCommand::new(ctx)?)), "tag", &["t"]);
        commands.add(ctx, |ctx| Ok(Box::new(ReleaseCommand::new(ctx)?)), "release", &["r"]);
        Self { commands }
    }

    #[must_use]
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Run `args` (command name first) and return the process exit code.
    pub fn run(&mut self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        let (name, argv) = args
            .split_first()
            .map_or((None, args), |(name, argv)| (Some(name.as_str()), argv));

        let mut invalid = InvalidCommand::new(name, self.commands.to_string());
        let command = name
            .and_then(|n| self.commands.get_mut(n))
            .unwrap_or(&mut invalid);

        let result = command.run(argv, &mut Io::new(&mut *out, &mut *err));
        finish(result, &*command, out, err).unwrap_or(1)
    }
}

fn finish(
    result: Result<(), CliError>,
    command: &dyn Command,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<i32> {
    match result {
        Ok(()) => Ok(0),
        Err(CliError::HelpExit) => {
            puts(out, &command.help())?;
            Ok(0)
        }
        Err(CliError::VersionExit) => {
            puts(out, env!("CARGO_PKG_VERSION"))?;
            Ok(0)
        }
        Err(
            error @ (CliError::Parse(_) | CliError::Argument(_) | CliError::InvalidCommand(_)),
        ) => {
            crate::debug!("{error:?}");
            puts(err, &format!("{error}\n\n"))?;
            puts(out, &command.help())?;
            Ok(1)
        }
        Err(CliError::CommandExit) => Ok(1),
        Err(error) => {
            display_error(err, &error)?;
            Ok(1)
        }
    }
}

/// Display an error with its causes, and its backtrace when debugging
fn display_error(err: &mut dyn Write, error: &CliError) -> io::Result<()> {
    writeln!(err, "error: {error}")?;

    let mut source = error.source();
    while let Some(cause) = source {
        writeln!(err, "caused by: {cause}")?;
        source = cause.source();
    }

    if let CliError::Other(inner) = error {
        let backtrace = inner.backtrace();
        if crate::debug::is_debug_enabled()
            && backtrace.status() == std::backtrace::BacktraceStatus::Captured
        {
            writeln!(err, "\nBacktrace:")?;
            writeln!(err, "{backtrace}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_utils::FakeRunner;
    use crate::test_utils::fixtures::create_gem_dir;
    use std::path::Path;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Outcome {
        code: i32,
        out: String,
        err: String,
    }

    fn run_cli(dir: &Path, runner: &Rc<FakeRunner>, args: &[&str]) -> Outcome {
        let ctx = Context::new(dir, Config::default(), runner.clone());
        let mut cli = Cli::new(&ctx);
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = cli.run(&args, &mut out, &mut err);

        Outcome {
            code,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    #[test]
    fn registers_every_command_inside_a_gem() {
        let dir = create_gem_dir("foo", "1.2.3");
        let ctx = Context::new(dir.path(), Config::default(), Rc::new(FakeRunner::default()));
        let cli = Cli::new(&ctx);

        assert_eq!(cli.commands().size(), 6);
        for (alias, name) in [
            ("g", "generate"),
            ("b", "build"),
            ("i", "install"),
            ("p", "push"),
            ("t", "tag"),
            ("r", "release"),
        ] {
            assert_eq!(cli.commands().primary_name(alias), Some(name));
        }
    }

    #[test]
    fn only_generate_is_available_outside_a_gem() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), Config::default(), Rc::new(FakeRunner::default()));
        let cli = Cli::new(&ctx);

        assert_eq!(cli.commands().size(), 1);
        assert!(cli.commands().contains("generate"));
        assert!(!cli.commands().contains("build"));
    }

    #[test]
    fn no_command_shows_the_listing() {
        let dir = create_gem_dir("foo", "1.2.3");
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &[]);

        assert_eq!(outcome.code, 0);
        assert!(outcome.out.starts_with("Usage: ggem [COMMAND] [options]\n"));
        assert!(outcome.out.contains("\n  generate (g) # Create a gem given a GEM-NAME\n"));
        assert!(outcome.out.contains("\n  build    (b) # Build foo-1.2.3.gem into the pkg directory\n"));
        assert!(outcome.err.is_empty());
    }

    #[test]
    fn version_flag_prints_the_version() {
        let dir = TempDir::new().unwrap();
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &["--version"]);

        assert_eq!(outcome.code, 0);
        assert_eq!(outcome.out, format!("{}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn command_help_exits_cleanly() {
        let dir = create_gem_dir("foo", "1.2.3");
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &["t", "-h"]);

        assert_eq!(outcome.code, 0);
        assert!(outcome.out.starts_with("Usage: ggem tag [options]\n"));
    }

    #[test]
    fn unknown_commands_fail_with_help() {
        let dir = TempDir::new().unwrap();
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &["build"]);

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.err, "`build` is not a command.\n\n");
        assert!(outcome.out.starts_with("Usage: ggem [COMMAND] [options]\n"));
    }

    #[test]
    fn argument_errors_fail_with_the_command_help() {
        let dir = TempDir::new().unwrap();
        let runner = Rc::new(FakeRunner::default());
        let outcome = run_cli(dir.path(), &runner, &["generate"]);

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.err, "GEM-NAME must be provided\n\n");
        assert!(outcome.out.starts_with("Usage: ggem generate [options] GEM-NAME\n"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn parse_errors_fail_with_the_command_help() {
        let dir = create_gem_dir("foo", "1.2.3");
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &["build", "--bogus"]);

        assert_eq!(outcome.code, 1);
        assert!(outcome.err.contains("--bogus"));
        assert!(outcome.out.starts_with("Usage: ggem build [options]\n"));
    }

    #[test]
    fn command_failures_exit_without_help() {
        let dir = create_gem_dir("foo", "1.2.3");
        let runner = Rc::new(FakeRunner::failing(&["git diff --exit-code"]));
        let outcome = run_cli(dir.path(), &runner, &["tag"]);

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.err, "There are files that need to be committed first.\n");
        assert!(outcome.out.is_empty());
    }

    #[test]
    fn successful_commands_exit_zero() {
        let dir = create_gem_dir("foo", "1.2.3");
        let outcome = run_cli(dir.path(), &Rc::new(FakeRunner::default()), &["tag"]);

        assert_eq!(outcome.code, 0);
        assert_eq!(outcome.out, "Tagged v1.2.3.\nPushed git commits and tags.\n");
    }

    #[test]
    fn unexpected_errors_show_their_causes() {
        let io_err = io::Error::other("disk full");
        let error = CliError::Other(anyhow::Error::new(io_err).context("writing gem"));
        let mut err = Vec::new();

        display_error(&mut err, &error).unwrap();

        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: writing gem\ncaused by: disk full\n"
        );
    }
}
