//! New gem skeleton
//!
//! Writes the folders and starter files for a gem generated by `ggem generate`.

use crate::gem::{Gem, GemError};
use chrono::Datelike;
use std::fs;
use std::path::Path;

const RUBY_VERSION: &str = "3.3.0";

/// Renders a [`Gem`]'s skeleton into its directory
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    gem: &'a Gem,
}

impl<'a> Template<'a> {
    pub fn new(gem: &'a Gem) -> Self {
        Self { gem }
    }

    pub fn save(self) -> Result<(), GemError> {
        let ruby_name = self.gem.ruby_name();

        self.save_folder("")?;
        self.save_folder(&format!("lib/{ruby_name}"))?;
        self.save_folder("test/support")?;
        self.save_folder("test/system")?;
        self.save_folder("test/unit")?;
        self.save_folder("log")?;
        self.save_folder("tmp")?;

        self.save_file(".ruby-version", &format!("{RUBY_VERSION}\n"))?;
        self.save_file(".gitignore", GITIGNORE)?;
        self.save_file("Gemfile", &gemfile())?;
        self.save_file(&format!("{}.gemspec", self.gem.name()), &self.gemspec())?;
        self.save_file("README.md", &self.readme())?;
        self.save_file("LICENSE", &license(chrono::Local::now().year()))?;

        self.save_file(&format!("lib/{ruby_name}.rb"), &self.lib_file())?;
        self.save_file(&format!("lib/{ruby_name}/version.rb"), &self.version_file())?;

        self.save_file("test/helper.rb", &self.test_helper())?;
        self.save_file("test/support/factory.rb", TEST_FACTORY)?;

        self.save_file("log/.keep", "")?;
        self.save_file("test/system/.keep", "")?;
        self.save_file("test/unit/.keep", "")?;
        self.save_file("tmp/.keep", "")?;

        Ok(())
    }

    fn save_folder(self, relative_path: &str) -> Result<(), GemError> {
        let path = self.gem.path().join(relative_path);
        fs::create_dir_all(&path).map_err(|source| GemError::Io { path, source })
    }

    fn save_file(self, relative_path: &str, content: &str) -> Result<(), GemError> {
        let path = self.gem.path().join(relative_path);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&path, content).map_err(|source| GemError::Io { path, source })
    }

    fn gemspec(self) -> String {
        let name = self.gem.name();
        let ruby_name = self.gem.ruby_name();
        let module_name = self.gem.module_name();
        format!(
            r#"# -*- encoding: utf-8 -*-
# frozen_string_literal: true

lib = File.expand_path("../lib", __FILE__)
$LOAD_PATH.unshift(lib) unless $LOAD_PATH.include?(lib)
require "{ruby_name}/version"

Gem::Specification.new do |gem|
  gem.name        = "{name}"
  gem.version     = {module_name}::VERSION
  gem.authors     = ["TODO: authors"]
  gem.email       = ["TODO: emails"]
  gem.summary     = "TODO: Write a gem summary"
  gem.description = "TODO: Write a gem description"
  gem.homepage    = "TODO: homepage"
  gem.license     = "MIT"

  gem.files = `git ls-files | grep "^[^.]"`.split($INPUT_RECORD_SEPARATOR)

  gem.executables   = gem.files.grep(%r{{^bin/}}).map{{ |f| File.basename(f) }}
  gem.test_files    = gem.files.grep(%r{{^(test|spec|features)/}})
  gem.require_paths = ["lib"]

  gem.required_ruby_version = "~> {RUBY_VERSION}"

  gem.add_development_dependency("assert", ["~> 2.20.0"])
end
"#
        )
    }

    fn readme(self) -> String {
        let name = self.gem.name();
        let module_name = self.gem.module_name();
        format!(
            r#"# {module_name}

TODO: Write code samples and usage instructions here

## Installation

Add this line to your application's Gemfile:

    gem "{name}"

And then execute:

    $ bundle

Or install it yourself as:

    $ gem install {name}

## Contributing

1. Fork it
2. Create your feature branch (`git checkout -b my-new-feature`)
3. Commit your changes (`git commit -am "Added some feature"`)
4. Push to the branch (`git push origin my-new-feature`)
5. Create new Pull Request
"#
        )
    }

    fn lib_file(self) -> String {
        let ruby_name = self.gem.ruby_name();
        let module_name = self.gem.module_name();
        format!(
            r#"# frozen_string_literal: true

require "{ruby_name}/version"

module {module_name}
  # TODO: your code goes here...
end
"#
        )
    }

    fn version_file(self) -> String {
        let module_name = self.gem.module_name();
        format!(
            r#"# frozen_string_literal: true

module {module_name}
  VERSION = "0.0.1"
end
"#
        )
    }

    fn test_helper(self) -> String {
        let ruby_name = self.gem.ruby_name();
        format!(
            r#"# frozen_string_literal: true

# this file is automatically required when you run `assert`
# put any test helpers here

# add the root dir to the load path
$LOAD_PATH.unshift(File.expand_path("../..", __FILE__))

# require pry for debugging (`binding.pry`)
require "pry"

require "test/support/factory"

# require "{ruby_name}"
"#
        )
    }
}

fn gemfile() -> String {
    format!(
        r#"# frozen_string_literal: true

source "https://rubygems.org"

ruby "~> {RUBY_VERSION}"

gemspec

gem "pry", "~> 0.14.2"
"#
    )
}

fn ensure_dir(path: &Path) -> Result<(), GemError> {
    fs::create_dir_all(path).map_err(|source| GemError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn license(year: i32) -> String {
    format!(
        r#"Copyright (c) {year}-Present TODO: authors

MIT License

Permission is hereby granted, free of charge, to any person obtaining
a copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including
without limitation the rights to use, copy, modify, merge, publish,
distribute, sublicense, and/or sell copies of the Software, and to
permit persons to whom the Software is furnished to do so, subject to
the following conditions:

The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
"#
    )
}

const GITIGNORE: &str = "*.gem
*.log
*.output
*.rbc
.rbx
.bundle
.config
.yardoc
.irbrc
Gemfile.lock
InstalledFiles
_yardoc
coverage
doc/
lib/bundler/man
pkg
rdoc
spec/reports
test/tmp
test/version_tmp
tmp
";

const TEST_FACTORY: &str = r#"# frozen_string_literal: true

require "assert/factory"

module Factory
  extend Assert::Factory
end
"#;
