//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration sources or syncing flags.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file's extension is not one of the recognized formats.
    #[error("'{extension}' extension is not supported, use one of [{}]", .supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: &'static [&'static str],
    },

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file was read but could not be parsed.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: figment::Error,
    },

    /// A config value could not be coerced into the bound flag's type.
    #[error("cannot assign '{value}' to '{key}': {reason}")]
    FlagAssign {
        key: String,
        value: String,
        reason: String,
    },

    /// One or more flags failed to sync from configuration.
    #[error("{}", format_sync_failures(.0))]
    Sync(Vec<ConfigError>),
}

fn format_sync_failures(failures: &[ConfigError]) -> String {
    let details: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!(
        "failed to sync {} flag(s) from configuration: {}",
        failures.len(),
        details.join("; ")
    )
}
