//! Gem names and new gem skeletons
//!
//! A gem name given on the command line may be simple (`simple`),
//! underscored (`my_gem`), camel-cased (`MyGem`) or hyphenated (`my-gem`).
//! It is normalized once; the module and ruby names derive from that.

use crate::template::Template;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static CAMEL_HUMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])([a-z])").expect("should build valid regex"));

static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("should build valid regex"));

#[derive(Debug, Error)]
pub enum GemError {
    #[error("no gem name given")]
    NoName,

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A gem to be generated under `root_path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gem {
    root_path: PathBuf,
    name: String,
}

impl Gem {
    pub fn new(root_path: &Path, name: &str) -> Result<Self, GemError> {
        if name.is_empty() {
            return Err(GemError::NoName);
        }
        Ok(Self {
            root_path: root_path.to_path_buf(),
            name: normalize_name(name),
        })
    }

    /// Write the gem skeleton to disk.
    pub fn save(&self) -> Result<&Self, GemError> {
        Template::new(self).save()?;
        Ok(self)
    }

    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Directory the gem is generated into
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root_path.join(&self.name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// e.g. `my_gem` -> `MyGem`, `my-gem` -> `MyGem`
    #[must_use]
    pub fn module_name(&self) -> String {
        self.name
            .split(['_', '-'])
            .map(capitalize)
            .collect()
    }

    /// Name used for the gem's lib paths and requires
    #[must_use]
    pub fn ruby_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Normalize a gem name: `MyGem`, `myGem`, `My_Gem` and `my__gem` all become `my_gem`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let humped = CAMEL_HUMP.replace_all(name, "_${1}${2}");
    let collapsed = UNDERSCORE_RUN.replace_all(&humped, "_");
    let trimmed = collapsed.strip_prefix('_').unwrap_or(&collapsed);
    trimmed.to_lowercase()
}

// First letter upper, rest lower.
fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct NameSet {
        variations: &'static [&'static str],
        name: &'static str,
        module_name: &'static str,
        ruby_name: &'static str,
    }

    const SIMPLE: NameSet = NameSet {
        variations: &["simple"],
        name: "simple",
        module_name: "Simple",
        ruby_name: "simple",
    };

    const UNDERSCORED: NameSet = NameSet {
        variations: &["my_gem", "my__gem", "MyGem", "myGem", "My_Gem"],
        name: "my_gem",
        module_name: "MyGem",
        ruby_name: "my_gem",
    };

    const HYPHENATED: NameSet = NameSet {
        variations: &["my-gem"],
        name: "my-gem",
        module_name: "MyGem",
        ruby_name: "my-gem",
    };

    #[test]
    fn derives_names_for_every_spelling() {
        for set in [SIMPLE, UNDERSCORED, HYPHENATED] {
            for variation in set.variations {
                let gem = Gem::new(Path::new("/tmp"), variation).unwrap();
                assert_eq!(gem.name(), set.name, "name of {variation}");
                assert_eq!(gem.module_name(), set.module_name, "module of {variation}");
                assert_eq!(gem.ruby_name(), set.ruby_name, "ruby name of {variation}");
            }
        }
    }

    #[test]
    fn normalizing_is_idempotent() {
        for name in ["simple", "MyGem", "my__gem", "my-gem", "HTTPClient", "a_B_c"] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once, "normalizing {name}");
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            Gem::new(Path::new("/tmp"), ""),
            Err(GemError::NoName)
        ));
    }

    #[test]
    fn knows_its_root_path_and_path() {
        let gem = Gem::new(Path::new("/tmp/gems"), "a-gem").unwrap();
        assert_eq!(gem.root_path(), Path::new("/tmp/gems"));
        assert_eq!(gem.path(), PathBuf::from("/tmp/gems/a-gem"));
    }

    #[test]
    fn save_writes_the_skeleton() {
        let temp = TempDir::new().unwrap();
        let gem = Gem::new(temp.path(), "MyGem").unwrap();
        let saved = gem.save().unwrap();
        assert!(std::ptr::eq(saved, &gem));

        let root = temp.path().join("my_gem");
        assert!(root.join("my_gem.gemspec").is_file());
        assert!(root.join("lib/my_gem/version.rb").is_file());
        let lib = fs::read_to_string(root.join("lib/my_gem.rb")).unwrap();
        assert!(lib.contains("module MyGem"));
    }
}
