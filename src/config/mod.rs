//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI flags
//! with proper precedence (CLI > Env > File > Defaults).

pub mod error;
pub mod sources;
pub mod sync;

pub use error::ConfigError;
pub use sources::{ConfigSources, ENV_PREFIX};
pub use sync::FlagBindings;
