//! Shared test helpers and utilities

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Get the path to the ggem binary built for this test run
pub(crate) fn get_ggem_binary() -> String {
    env!("CARGO_BIN_EXE_ggem").to_string()
}

/// Run ggem in `dir` with `args`, with debug output and host overrides cleared
pub(crate) fn run_ggem(dir: &Path, args: &[&str]) -> Output {
    Command::new(get_ggem_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("DEBUG")
        .env_remove("GGEM_PUSH_HOST")
        .output()
        .expect("Failed to execute ggem")
}

/// Write a minimal `<name>.gemspec` into `dir`
#[allow(dead_code)]
pub(crate) fn write_gemspec(dir: &Path, name: &str, version: &str) {
    let content = format!(
        "Gem::Specification.new do |gem|\n  gem.name    = \"{name}\"\n  gem.version = \"{version}\"\n  gem.summary = \"{name} for tests\"\nend\n"
    );
    fs::write(dir.join(format!("{name}.gemspec")), content).expect("Failed to write gemspec");
}

/// Whether a usable `git` is on the PATH
#[allow(dead_code)]
pub(crate) fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Run git in `dir`, panicking with its stderr when it fails
#[allow(dead_code)]
pub(crate) fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Turn `gem_dir` into a committed repo tracking a bare `remote` repo
#[allow(dead_code)]
pub(crate) fn init_tracked_repo(gem_dir: &Path, remote: &Path) {
    git(remote, &["init", "--bare", "--quiet"]);

    git(gem_dir, &["init", "--quiet"]);
    git(gem_dir, &["config", "user.name", "ggem tests"]);
    git(gem_dir, &["config", "user.email", "tests@example.com"]);
    git(gem_dir, &["config", "commit.gpgsign", "false"]);
    git(gem_dir, &["config", "tag.gpgsign", "false"]);
    git(gem_dir, &["add", "--all"]);
    git(gem_dir, &["commit", "--quiet", "-m", "initial"]);

    let remote = remote.to_string_lossy();
    git(gem_dir, &["remote", "add", "origin", &remote]);
    git(gem_dir, &["push", "--quiet", "-u", "origin", "HEAD"]);
}
