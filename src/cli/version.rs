//! Version command implementation

use anyhow::Result;
use clap::{ArgMatches, Args};

use crate::config::{ConfigSources, FlagBindings};
use crate::version::release::up_to_date;
use crate::version::{BuildInfo, ReleaseChecker};

#[derive(Args)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(short, long)]
    pub short: bool,

    /// Query the release feed and report whether a newer release exists
    #[arg(long)]
    pub check: bool,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,
}

pub fn run(mut args: VersionArgs, sources: &ConfigSources, matches: &ArgMatches) -> Result<()> {
    FlagBindings::new("version")
        .bind("short", &mut args.short)
        .bind("check", &mut args.check)
        .bind("output", &mut args.output)
        .sync_all(sources, matches)?;

    let build = BuildInfo::current();

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&build)?),
        "text" => print_text(&build, args.short),
        other => anyhow::bail!("unknown output format '{other}', use one of [text, json]"),
    }

    if args.check && !args.short {
        // Advisory only: a failed lookup is logged, never a non-zero exit.
        match ReleaseChecker::new().latest_release() {
            Ok(latest) if up_to_date(build.version, &latest) => {
                println!("You are running the latest release.");
            }
            Ok(latest) => {
                println!("A newer release is available: {latest} (current: {})", build.version);
            }
            Err(err) => tracing::warn!("release check failed: {err}"),
        }
    }

    Ok(())
}

fn print_text(build: &BuildInfo, short: bool) {
    if short {
        println!("{}", build.version);
        return;
    }

    println!("cli-scaffold {}", build.version);
    if !build.commit.is_empty() {
        println!("  commit: {}", build.commit);
    }
    if !build.build_time.is_empty() {
        println!("  built:  {}", build.build_time);
    }
    println!("  release build: {}", build.released());
}
