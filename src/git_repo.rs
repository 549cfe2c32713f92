//! Git operations for a gem's repository
//!
//! Shells out to system git. Each command is prefixed with a directory change
//! to the repository root so it runs in the right place regardless of the
//! process working directory.

use crate::shell::{CmdError, CmdResult, CmdRunner};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitRepoError {
    #[error("{0}")]
    Cmd(#[from] CmdError),
}

/// A git repository rooted at an absolute path
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
    runner: Rc<dyn CmdRunner>,
}

impl GitRepo {
    pub fn new(path: &Path, runner: Rc<dyn CmdRunner>) -> Self {
        Self {
            path: crate::paths::absolute(path),
            runner,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `git init`, then stage everything including the `.keep` placeholders.
    pub fn run_init_cmd(&self) -> Result<CmdResult, GitRepoError> {
        let result = self.run_cmd("git init")?;
        self.run_cmd("git add --all && git add -f *.keep")?;
        Ok(result)
    }

    /// Fails when the working tree has unstaged changes.
    pub fn run_validate_clean_cmd(&self) -> Result<CmdResult, GitRepoError> {
        self.run_cmd("git diff --exit-code")
    }

    /// Fails when the index has changes not yet committed.
    pub fn run_validate_committed_cmd(&self) -> Result<CmdResult, GitRepoError> {
        self.run_cmd("git diff-index --quiet --cached HEAD")
    }

    pub fn run_push_cmd(&self) -> Result<CmdResult, GitRepoError> {
        let result = self.run_cmd("git push")?;
        self.run_cmd("git push --tags")?;
        Ok(result)
    }

    pub fn run_add_version_tag_cmd(
        &self,
        version: &str,
        tag: &str,
    ) -> Result<CmdResult, GitRepoError> {
        self.run_cmd(&format!("git tag -a -m \"Version {version}\" {tag}"))
    }

    pub fn run_rm_tag_cmd(&self, tag: &str) -> Result<CmdResult, GitRepoError> {
        self.run_cmd(&format!("git tag -d {tag}"))
    }

    fn run_cmd(&self, command: &str) -> Result<CmdResult, GitRepoError> {
        let command = format!("cd {} && {command}", self.path.display());
        Ok(self.runner.run(&command)?)
    }
}
