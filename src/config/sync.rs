//! Flag synchronization against the layered configuration.
//!
//! A flag can be declared optional at the CLI layer yet still receive its
//! value from the config file or environment: each command builds an
//! explicit binding table mapping flag names to typed setters, then syncs
//! every binding whose flag was not set on the command line. The binding
//! fixes the fully-qualified key `<command>.<flag>`, mirroring the nested
//! `command: { flag: value }` structure of a config file.

use std::fmt::Display;
use std::str::FromStr;

use clap::parser::ValueSource;
use clap::ArgMatches;

use super::error::ConfigError;
use super::sources::ConfigSources;

type Setter<'a> = Box<dyn FnMut(&str) -> Result<(), String> + 'a>;

struct Binding<'a> {
    name: String,
    assign: Setter<'a>,
}

/// Explicit table of `<command>.<flag>` bindings for one command.
///
/// Binding names must match the clap arg ids of the command; single-word
/// long names keep the environment `_`-split mapping unambiguous.
pub struct FlagBindings<'a> {
    command: String,
    flags: Vec<Binding<'a>>,
}

impl<'a> FlagBindings<'a> {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            flags: Vec::new(),
        }
    }

    /// Registers a flag under its fully-qualified key, coupling it with a
    /// typed slot in the parsed args. Config values are coerced via
    /// `FromStr`; a failed coercion turns into [`ConfigError::FlagAssign`]
    /// during sync.
    pub fn bind<T>(mut self, name: impl Into<String>, slot: &'a mut T) -> Self
    where
        T: FromStr,
        T::Err: Display,
    {
        let assign: Setter<'a> = Box::new(move |raw| match raw.parse::<T>() {
            Ok(value) => {
                *slot = value;
                Ok(())
            }
            Err(err) => Err(err.to_string()),
        });
        self.flags.push(Binding {
            name: name.into(),
            assign,
        });
        self
    }

    /// Fully-qualified configuration key for a flag of this command.
    pub fn qualified(&self, flag: &str) -> String {
        format!("{}.{}", self.command, flag)
    }

    /// Writes the configured value into a single bound flag, unless the
    /// flag was set explicitly on the command line (CLI always wins) or the
    /// configuration has no non-empty value for it.
    pub fn sync_flag(
        &mut self,
        sources: &ConfigSources,
        matches: &ArgMatches,
        name: &str,
    ) -> Result<(), ConfigError> {
        let key = self.qualified(name);
        let Some(binding) = self.flags.iter_mut().find(|b| b.name == name) else {
            return Ok(());
        };
        if matches!(matches.value_source(name), Some(ValueSource::CommandLine)) {
            return Ok(());
        }
        let Some(value) = sources.get(&key) else {
            return Ok(());
        };
        tracing::debug!("flag {key} set from configuration");
        (binding.assign)(&value).map_err(|reason| ConfigError::FlagAssign { key, value, reason })
    }

    /// Syncs every bound flag, accumulating failures instead of stopping at
    /// the first; successful bindings are applied even when others fail.
    pub fn sync_all(
        mut self,
        sources: &ConfigSources,
        matches: &ArgMatches,
    ) -> Result<(), ConfigError> {
        let names: Vec<String> = self.flags.iter().map(|b| b.name.clone()).collect();
        let mut failures = Vec::new();
        for name in names {
            if let Err(err) = self.sync_flag(sources, matches, &name) {
                failures.push(err);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Sync(failures))
        }
    }
}
