//! Shared test utilities for ggem tests
//!
//! Gem directory fixtures and a recording command runner, so command
//! workflows can be exercised without git or rubygems installed.

#[cfg(test)]
pub mod fixtures {
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Write `<name>.gemspec` into `dir` with the given content
    pub fn write_gemspec(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(format!("{name}.gemspec")), content).expect("Failed to write gemspec");
    }

    /// Create a temporary gem root holding a minimal gemspec
    pub fn create_gem_dir(name: &str, version: &str) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let content = format!(
            r#"Gem::Specification.new do |spec|
  spec.name          = "{name}"
  spec.version       = "{version}"
  spec.authors       = ["Test Author"]
  spec.email         = ["test@example.com"]
  spec.summary       = "Test gem {name}"
  spec.license       = "MIT"
end
"#
        );

        write_gemspec(temp_dir.path(), name, &content);
        temp_dir
    }
}

#[cfg(test)]
pub use fake_runner::FakeRunner;

#[cfg(test)]
mod fake_runner {
    use crate::shell::{CmdError, CmdResult, CmdRunner};
    use std::cell::RefCell;

    /// Records every command it is asked to run.
    ///
    /// Commands ending with one of the configured patterns fail with
    /// `"<command> failed"` as their output; everything else succeeds with
    /// `"<command> output"` on stdout.
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        failing: Vec<String>,
        commands: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        pub fn failing(patterns: &[&str]) -> Self {
            Self {
                failing: patterns.iter().map(|p| (*p).to_string()).collect(),
                commands: RefCell::default(),
            }
        }

        /// Commands run so far, in order
        pub fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }

        /// Number of commands run that end with `suffix`
        pub fn count(&self, suffix: &str) -> usize {
            self.commands
                .borrow()
                .iter()
                .filter(|c| c.ends_with(suffix))
                .count()
        }
    }

    impl CmdRunner for FakeRunner {
        fn run(&self, command: &str) -> Result<CmdResult, CmdError> {
            self.commands.borrow_mut().push(command.to_string());

            if self.failing.iter().any(|p| command.ends_with(p.as_str())) {
                return Err(CmdError::new(command, format!("{command} failed")));
            }

            Ok(CmdResult {
                command: command.to_string(),
                status: 0,
                stdout: format!("{command} output"),
            })
        }
    }
}

#[cfg(test)]
pub use spy_command::SpyCommand;

#[cfg(test)]
mod spy_command {
    use crate::commands::{CliError, Command, Io};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Stands in for a sub-command, recording the argv of every run.
    ///
    /// Clones share their recorded calls, so a test can keep one clone and
    /// hand another to the command under test.
    #[derive(Debug, Clone, Default)]
    pub struct SpyCommand {
        fails: bool,
        calls: Rc<RefCell<Vec<Vec<String>>>>,
    }

    impl SpyCommand {
        pub fn new() -> Self {
            Self::default()
        }

        /// A spy whose runs end in [`CliError::CommandExit`]
        pub fn failing() -> Self {
            Self {
                fails: true,
                calls: Rc::default(),
            }
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl Command for SpyCommand {
        fn run(&mut self, argv: &[String], _io: &mut Io<'_>) -> Result<(), CliError> {
            self.calls.borrow_mut().push(argv.to_vec());
            if self.fails {
                return Err(CliError::CommandExit);
            }
            Ok(())
        }

        fn help(&self) -> String {
            "spy".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::CmdRunner;

    #[test]
    fn fake_runner_records_and_fails_on_suffix() {
        let runner = FakeRunner::failing(&["git push"]);

        assert!(runner.run("cd /x && git push --tags").is_ok());
        let err = runner.run("cd /x && git push").unwrap_err();
        assert_eq!(err.output, "cd /x && git push failed");

        assert_eq!(runner.commands().len(), 2);
        assert_eq!(runner.count("git push"), 1);
    }

    #[test]
    fn gem_dir_fixture_has_a_gemspec() {
        let dir = fixtures::create_gem_dir("foo", "1.2.3");
        let content = std::fs::read_to_string(dir.path().join("foo.gemspec")).unwrap();
        assert!(content.contains("spec.version       = \"1.2.3\""));
    }
}
