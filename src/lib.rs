//! cli-scaffold: starter scaffolding for command-line tools
//!
//! Two small, independent building blocks behind a thin clap CLI:
//!
//! - [`config`]: layered configuration (flags > environment > file) keyed by
//!   fully-qualified `<command>.<flag>` names, with typed flag syncing;
//! - [`version`]: build metadata embedded at compile time plus a release
//!   checker against the GitHub "latest release" endpoint.

pub mod cli;
pub mod config;
pub mod version;
