//! Layered configuration registry backed by figment.
//!
//! Precedence (highest wins): CLI flags > environment variables > config
//! file > flag defaults. The flag layer is applied by [`crate::config::sync`];
//! this module merges the environment and file layers and answers lookups by
//! fully-qualified `<command>.<flag>` key.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use figment::providers::{Env, Format, Json, Toml, Yaml};
use figment::value::{Num, Value};
use figment::Figment;

use super::error::ConfigError;

/// Environment variable prefix; `SCAFFOLD_DEVELOP_PORT` maps to the
/// qualified key `develop.port`.
pub const ENV_PREFIX: &str = "SCAFFOLD_";

const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Merged view over the environment and config-file layers.
///
/// Construct one per bootstrap with [`ConfigSources::load`]; rebuilding the
/// value replaces all prior state, so repeated setup calls stay idempotent.
#[derive(Debug)]
pub struct ConfigSources {
    figment: Figment,
}

impl ConfigSources {
    /// Recognized config file formats, as file extensions.
    pub fn supported_extensions() -> &'static [&'static str] {
        SUPPORTED_EXTENSIONS
    }

    /// Builds the layered registry from `config_file` plus the environment.
    ///
    /// The extension is validated before the filesystem is touched. A
    /// missing file is an error only when `strict` is set (explicitly
    /// requested config); read and parse failures are errors regardless of
    /// strictness. Parse errors surface here, not at first lookup.
    pub fn load(config_file: &Path, strict: bool) -> Result<Self, ConfigError> {
        let extension = config_file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let Some(format) = FileFormat::from_extension(&extension) else {
            return Err(ConfigError::UnsupportedFormat {
                extension,
                supported: SUPPORTED_EXTENSIONS,
            });
        };

        let raw = match fs::read_to_string(config_file) {
            Ok(raw) => Some(raw),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                if strict {
                    return Err(ConfigError::NotFound {
                        path: config_file.to_path_buf(),
                    });
                }
                tracing::debug!("no config file at {}, using defaults", config_file.display());
                None
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: config_file.to_path_buf(),
                    source,
                })
            }
        };

        let mut figment = Figment::new();
        if let Some(raw) = raw {
            figment = match format {
                FileFormat::Toml => figment.merge(Toml::string(&raw)),
                FileFormat::Yaml => figment.merge(Yaml::string(&raw)),
                FileFormat::Json => figment.merge(Json::string(&raw)),
            };
            // Probe the merged view so malformed files fail at load time.
            if let Err(source) = figment.extract::<Value>() {
                return Err(ConfigError::Parse {
                    path: config_file.to_path_buf(),
                    source,
                });
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("_"));

        Ok(Self { figment })
    }

    /// Looks up a fully-qualified dotted key (e.g. `develop.port`) across
    /// all layers, rendering scalar values to strings the way flag parsing
    /// expects. Missing keys, empty strings, and non-scalar values yield
    /// `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.figment.find_value(key).ok()?;
        let rendered = render_scalar(&value)?;
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }
}

impl Default for ConfigSources {
    /// Environment-only registry, no file layer.
    fn default() -> Self {
        Self {
            figment: Figment::new().merge(Env::prefixed(ENV_PREFIX).split("_")),
        }
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(_, s) => Some(s.clone()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Bool(_, b) => Some(b.to_string()),
        Value::Num(_, num) => Some(render_num(num)),
        Value::Empty(..) | Value::Dict(..) | Value::Array(..) => None,
    }
}

fn render_num(num: &Num) -> String {
    match *num {
        Num::U8(n) => n.to_string(),
        Num::U16(n) => n.to_string(),
        Num::U32(n) => n.to_string(),
        Num::U64(n) => n.to_string(),
        Num::U128(n) => n.to_string(),
        Num::USize(n) => n.to_string(),
        Num::I8(n) => n.to_string(),
        Num::I16(n) => n.to_string(),
        Num::I32(n) => n.to_string(),
        Num::I64(n) => n.to_string(),
        Num::I128(n) => n.to_string(),
        Num::ISize(n) => n.to_string(),
        Num::F32(n) => n.to_string(),
        Num::F64(n) => n.to_string(),
    }
}
