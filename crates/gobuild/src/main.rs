mod build;
mod catalog;
mod selection;

use std::ffi::OsString;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::selection::PlatformSelection;

/// Exit status when no platform was requested.
const EXIT_NO_PLATFORMS: i32 = 1;
/// Exit status for a bad `-platform` value, matching clap's usage errors.
const EXIT_BAD_FLAG: i32 = 2;

const EXAMPLES: &str = "EXAMPLES:
  gobuild -platform Windows-AMD64,Darwin-AMD64,Linux-AMD64
  gobuild -platform current --output-dir dist -- ./cmd/server
";

/// Setup logging based on verbose flag or RUST_LOG environment variable
fn setup_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("gobuild=debug")
    } else {
        EnvFilter::new("gobuild=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "gobuild")]
#[command(version, about = "Cross-compile a Go program for many platforms at once", long_about = None)]
struct Cli {
    /// Comma-separated list of platforms to build for
    #[arg(long, value_name = "LIST", action = ArgAction::Append)]
    platform: Vec<String>,

    /// List supported platforms and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging (shows the compiler command and its environment)
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    build: build::BuildConfig,
}

fn command() -> clap::Command {
    Cli::command().after_help(format!(
        "{}\n{}",
        catalog::supported_platforms_text(),
        EXAMPLES
    ))
}

/// Full help, printed to stderr whenever the platform list is unusable.
fn print_usage() {
    eprintln!("{}", command().render_help());
}

/// Accept Go-style `-platform` as well as `--platform`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some("-platform") => OsString::from("--platform"),
                Some(s) if s.starts_with("-platform=") => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let matches = command().get_matches_from(normalize_args(std::env::args_os()));
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    setup_logging(cli.verbose);

    let selection = match PlatformSelection::from_occurrences(&cli.platform) {
        Ok(selection) => selection,
        Err(err) => {
            eprintln!("invalid value for flag -platform: {err}\n");
            print_usage();
            std::process::exit(EXIT_BAD_FLAG);
        }
    };

    if cli.list {
        catalog::list_platforms();
        return Ok(());
    }

    if selection.is_empty() {
        print_usage();
        std::process::exit(EXIT_NO_PLATFORMS);
    }

    let report = build::run(&cli.build, &selection)?;
    if report.failed() > 0 {
        warn!(
            failed = report.failed(),
            total = report.results.len(),
            "Some platforms failed to build"
        );
    } else {
        info!(total = report.results.len(), "All platforms built");
    }

    Ok(())
}
