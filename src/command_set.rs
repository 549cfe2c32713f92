//! Command registry
//!
//! Maps command names and their aliases to one shared instance each and
//! renders the listing shown in the top-level help.

use crate::commands::{CliError, Command, Context};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Default)]
pub struct CommandSet {
    commands: Vec<Box<dyn Command>>,
    lookup: HashMap<String, usize>,
    names: Vec<String>,
    aliases: HashMap<String, String>,
    summaries: HashMap<String, String>,
}

impl CommandSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a command and register it under `name` and `aliases`.
    ///
    /// A command that cannot be constructed is left out entirely, so its
    /// names resolve like any other unknown name.
    pub fn add<F>(&mut self, ctx: &Context, build: F, name: &str, aliases: &[&str])
    where
        F: FnOnce(&Context) -> Result<Box<dyn Command>, CliError>,
    {
        let command = match build(ctx) {
            Ok(command) => command,
            Err(err) => {
                crate::debug!("not registering `{name}`: {err}");
                return;
            }
        };
        self.add_command(command, name, aliases);
    }

    /// Register an already constructed command.
    pub fn add_command(&mut self, command: Box<dyn Command>, name: &str, aliases: &[&str]) {
        let summary = command.summary();
        let index = self.commands.len();
        self.commands.push(command);

        for key in std::iter::once(name).chain(aliases.iter().copied()) {
            self.lookup.insert(key.to_string(), index);
        }
        self.names.push(name.to_string());
        self.aliases.insert(
            name.to_string(),
            if aliases.is_empty() {
                String::new()
            } else {
                format!("({})", aliases.join(", "))
            },
        );
        self.summaries.insert(
            name.to_string(),
            if summary.is_empty() {
                String::new()
            } else {
                format!("# {summary}")
            },
        );
    }

    /// Forget `name`. Its aliases keep resolving until removed themselves.
    pub fn remove(&mut self, name: &str) {
        self.lookup.remove(name);
        self.names.retain(|n| n != name);
        self.aliases.remove(name);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Command + 'static)> {
        let index = *self.lookup.get(name)?;
        self.commands.get_mut(index).map(|command| &mut **command)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// The listed name a name or alias resolves to
    pub fn primary_name(&self, name: &str) -> Option<&str> {
        let index = self.lookup.get(name)?;
        self.names
            .iter()
            .find(|primary| self.lookup.get(primary.as_str()) == Some(index))
            .map(String::as_str)
    }

    /// Number of listed commands
    pub fn size(&self) -> usize {
        self.names.len()
    }
}

impl fmt::Display for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.names.iter().map(String::len).max().unwrap_or(0);
        let alias_width = self.aliases.values().map(String::len).max().unwrap_or(0);

        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let aliases = self.aliases.get(name).map_or("", String::as_str);
            let summary = self.summaries.get(name).map_or("", String::as_str);
            write!(f, "{name:<name_width$} {aliases:<alias_width$} {summary}")?;
        }
        Ok(())
    }
}
