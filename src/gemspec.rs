//! Gemspec reading and gem packaging commands
//!
//! The gemspec is read textually rather than evaluated: the name, version and
//! `allowed_push_host` metadata are pulled out with the patterns generated
//! gemspecs use. A `Module::VERSION` constant is resolved from the gem's
//! `lib/**/version.rb`. Building, installing and pushing shell out to `gem`.

use crate::shell::{CmdError, CmdResult, CmdRunner};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::WalkDir;

/// Gemspec metadata key naming the host a gem may be pushed to
pub const PUSH_HOST_META_KEY: &str = "allowed_push_host";

/// Host used when neither the environment nor the gemspec names one
pub const DEFAULT_PUSH_HOST: &str = "https://rubygems.org";

/// Directory, relative to the gem root, that built gems are moved into
pub const BUILD_TO_DIRNAME: &str = "pkg";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*\w+\.name\s*=\s*["']([^"']+)["']"#).expect("should build valid regex")
});

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*\w+\.version\s*=\s*(?:["']([^"']+)["']|([A-Z][\w:]*)::VERSION\b)"#)
        .expect("should build valid regex")
});

static VERSION_CONST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*VERSION\s*=\s*["']([^"']+)["']"#).expect("should build valid regex")
});

static PUSH_HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"["']{PUSH_HOST_META_KEY}["']\s*(?:\]\s*=|=>)\s*["']([^"']+)["']"#
    ))
    .expect("should build valid regex")
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GemspecError {
    #[error("There are no gemspecs at {}", root.display())]
    NotFound { root: PathBuf },

    #[error("There was a problem loading {file}: {message}")]
    Load { file: String, message: String },

    #[error("{0}")]
    Cmd(#[from] CmdError),
}

/// A gem's specification, found at the root of the gem's source tree
#[derive(Debug, Clone)]
pub struct Gemspec {
    root: PathBuf,
    path: PathBuf,
    name: String,
    version: String,
    version_tag: String,
    gem_file_name: String,
    gem_file: String,
    built_gem_path: PathBuf,
    push_host: String,
    runner: Rc<dyn CmdRunner>,
}

impl Gemspec {
    /// Load the gemspec found in `root_path`.
    ///
    /// `push_host_override` wins over the gemspec's `allowed_push_host`
    /// metadata, which in turn wins over [`DEFAULT_PUSH_HOST`].
    pub fn new(
        root_path: &Path,
        push_host_override: Option<&str>,
        runner: Rc<dyn CmdRunner>,
    ) -> Result<Self, GemspecError> {
        let root = crate::paths::absolute(root_path);
        if !root.exists() {
            return Err(GemspecError::NotFound { root });
        }
        let Some(path) = crate::paths::find_gemspec_in(&root) else {
            return Err(GemspecError::NotFound { root });
        };
        crate::debug!("loading gemspec {}", path.display());

        let file = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().to_string());
        let content = fs::read_to_string(&path).map_err(|e| GemspecError::Load {
            file: file.clone(),
            message: e.to_string(),
        })?;

        let name = extract_name(&content).ok_or_else(|| GemspecError::Load {
            file: file.clone(),
            message: "could not find the gem name".to_string(),
        })?;
        let version = extract_version(&content, &root).ok_or_else(|| GemspecError::Load {
            file: file.clone(),
            message: "could not find the gem version".to_string(),
        })?;

        let push_host = push_host_override
            .map(String::from)
            .or_else(|| extract_push_host(&content))
            .unwrap_or_else(|| DEFAULT_PUSH_HOST.to_string());

        let gem_file_name = format!("{name}-{version}.gem");
        let gem_file = format!("{BUILD_TO_DIRNAME}/{gem_file_name}");
        let built_gem_path = root.join(&gem_file);

        Ok(Self {
            version_tag: format!("v{version}"),
            root,
            path,
            name,
            version,
            gem_file_name,
            gem_file,
            built_gem_path,
            push_host,
            runner,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The git tag for this version, e.g. `v1.2.3`
    #[must_use]
    pub fn version_tag(&self) -> &str {
        &self.version_tag
    }

    /// e.g. `foo-1.2.3.gem`
    #[must_use]
    pub fn gem_file_name(&self) -> &str {
        &self.gem_file_name
    }

    /// Built gem path relative to the root, e.g. `pkg/foo-1.2.3.gem`
    #[must_use]
    pub fn gem_file(&self) -> &str {
        &self.gem_file
    }

    #[must_use]
    pub fn built_gem_path(&self) -> &Path {
        &self.built_gem_path
    }

    #[must_use]
    pub fn push_host(&self) -> &str {
        &self.push_host
    }

    /// `gem build`, then move the artifact into the build directory.
    pub fn run_build_cmd(&self) -> Result<CmdResult, GemspecError> {
        let result = self.run_cmd(&format!("gem build --verbose {}", self.path.display()))?;

        let gem_path = self.root.join(&self.gem_file_name);
        let build_dir = self.built_gem_path.parent().unwrap_or(&self.root);
        self.run_cmd(&format!("mkdir -p {}", build_dir.display()))?;
        self.run_cmd(&format!(
            "mv {} {}",
            gem_path.display(),
            self.built_gem_path.display()
        ))?;

        Ok(result)
    }

    pub fn run_install_cmd(&self) -> Result<CmdResult, GemspecError> {
        self.run_cmd(&format!("gem install {}", self.built_gem_path.display()))
    }

    pub fn run_push_cmd(&self) -> Result<CmdResult, GemspecError> {
        self.run_cmd(&format!(
            "gem push {} --host {}",
            self.built_gem_path.display(),
            self.push_host
        ))
    }

    fn run_cmd(&self, command: &str) -> Result<CmdResult, GemspecError> {
        Ok(self.runner.run(command)?)
    }
}

fn extract_name(content: &str) -> Option<String> {
    NAME_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_version(content: &str, root: &Path) -> Option<String> {
    let caps = VERSION_PATTERN.captures(content)?;
    if let Some(literal) = caps.get(1) {
        return Some(literal.as_str().to_string());
    }
    caps.get(2)
        .and_then(|module| resolve_version_constant(root, module.as_str()))
}

/// Find `VERSION = "..."` in the gem's `lib/**/version.rb` files.
///
/// Files that also mention the constant's innermost module are preferred.
fn resolve_version_constant(root: &Path, module: &str) -> Option<String> {
    let innermost = module.rsplit("::").next().unwrap_or(module);

    let mut candidates: Vec<(bool, String)> = WalkDir::new(root.join("lib"))
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == "version.rb")
        .filter_map(|entry| fs::read_to_string(entry.path()).ok())
        .filter_map(|content| {
            let version = VERSION_CONST_PATTERN
                .captures(&content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())?;
            Some((content.contains(innermost), version))
        })
        .collect();

    candidates.sort_by_key(|(mentions_module, _)| !mentions_module);
    candidates.into_iter().next().map(|(_, version)| version)
}

fn extract_push_host(content: &str) -> Option<String> {
    PUSH_HOST_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
