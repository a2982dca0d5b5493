//! Command-line interface for cli-scaffold
//!
//! Wires the layered configuration bootstrap and dispatches subcommands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ConfigSources;

mod version;

/// Config file looked up in the working directory when `--config` is not
/// given; its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = ".scaffold.yml";

/// Starter scaffolding for configuration-driven command-line tools
#[derive(Parser)]
#[command(name = "cli-scaffold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (must exist when given explicitly)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show build information and check for newer releases
    Version(version::VersionArgs),
}

pub fn run() -> Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    // An explicitly requested config file must exist; the default location
    // is optional.
    let strict = cli.config.is_some();
    let config_file = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let sources = ConfigSources::load(&config_file, strict)?;

    let Some((_, sub_matches)) = matches.subcommand() else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    match cli.command {
        Commands::Version(args) => version::run(args, &sources, sub_matches),
    }
}
