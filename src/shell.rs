//! Shell command execution
//!
//! Every external step (git, gem, mkdir, mv) goes through a [`CmdRunner`] so
//! the command workflows can be driven against a recording fake in tests.

use std::fmt;
use std::process::Command;
use thiserror::Error;

/// Outcome of a shell command that exited successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdResult {
    /// The exact command string that was run
    pub command: String,
    /// Process exit status
    pub status: i32,
    /// Captured standard output
    pub stdout: String,
}

/// A shell command that could not be run or exited non-zero.
///
/// `output` holds stderr, or stdout when stderr was empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{command}\n{output}")]
pub struct CmdError {
    pub command: String,
    pub output: String,
}

impl CmdError {
    pub fn new(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
        }
    }
}

/// Runs one shell command string to completion.
pub trait CmdRunner: fmt::Debug {
    fn run(&self, command: &str) -> Result<CmdResult, CmdError>;
}

/// Runs commands through `sh -c` in the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CmdRunner for SystemRunner {
    fn run(&self, command: &str) -> Result<CmdResult, CmdError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| CmdError::new(command, e.to_string()))?;

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        crate::debug!("`{command}` exited with status {status}");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.is_empty() {
                stdout
            } else {
                stderr.to_string()
            };
            return Err(CmdError::new(command, detail));
        }

        Ok(CmdResult {
            command: command.to_string(),
            status,
            stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_command_captures_stdout() {
        let result = SystemRunner.run("echo hello").expect("echo should succeed");
        assert_eq!(result.command, "echo hello");
        assert_eq!(result.status, 0);
        assert_eq!(result.stdout, "hello\n");
    }

    #[test]
    fn failing_command_prefers_stderr() {
        let err = SystemRunner
            .run("echo out; echo oops >&2; exit 3")
            .expect_err("command should fail");
        assert_eq!(err.command, "echo out; echo oops >&2; exit 3");
        assert_eq!(err.output, "oops\n");
    }

    #[test]
    fn failing_command_falls_back_to_stdout() {
        let err = SystemRunner
            .run("echo only-out; exit 1")
            .expect_err("command should fail");
        assert_eq!(err.output, "only-out\n");
        assert_eq!(err.to_string(), "echo only-out; exit 1\nonly-out\n");
    }
}
