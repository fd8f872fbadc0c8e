use anyhow::{Context, Result};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Platform;
use crate::selection::PlatformSelection;

/// Configuration shared by every per-platform build
#[derive(Args, Debug, Clone)]
pub struct BuildConfig {
    /// Compiler invoked as `<compiler> build -o <dir>`
    #[arg(long, default_value = "go", env = "GOBUILD_COMPILER")]
    pub compiler: PathBuf,

    /// Root directory for the per-platform output folders
    #[arg(long, default_value = "output", env = "GOBUILD_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Extra arguments appended to every build command
    #[arg(last = true)]
    pub build_args: Vec<String>,
}

/// Result of building a single platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(String),
}

/// Per-platform outcomes, in the order they were built
#[derive(Debug, Default)]
pub struct BuildReport {
    pub results: Vec<(String, Outcome)>,
}

impl BuildReport {
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Failed(_)))
            .count()
    }
}

/// Environment handed to the compiler for `platform`.
///
/// Only the child sees these; the current process environment is left alone.
pub fn target_env(platform: &Platform) -> [(&'static str, &'static str); 2] {
    [("GOOS", platform.os), ("GOARCH", platform.arch)]
}

/// Build every selected platform in order.
///
/// A failing compiler only marks that platform as failed. Failing to create an
/// output directory aborts the whole run.
#[instrument(skip_all, fields(platforms = selection.len()))]
pub fn run(config: &BuildConfig, selection: &PlatformSelection) -> Result<BuildReport> {
    info!(
        platforms = ?selection.names().collect::<Vec<_>>(),
        output_dir = %config.output_dir.display(),
        "Starting builds"
    );

    if which::which(&config.compiler).is_err() {
        warn!(compiler = %config.compiler.display(), "Compiler not found on PATH");
    }

    let mut report = BuildReport::default();

    for (name, platform) in selection.iter() {
        let out_dir = config.output_dir.join(platform.dir_name());

        print!("Compiling for {name} ... ");
        std::io::stdout()
            .flush()
            .context("Failed to flush stdout")?;

        std::fs::create_dir_all(&out_dir).with_context(|| {
            format!("unable to create output folder {}", out_dir.display())
        })?;

        let outcome = build_platform(config, platform, &out_dir);
        match &outcome {
            Outcome::Success => {
                println!("{}", "success".if_supports_color(Stream::Stdout, |t| t.green()));
            }
            Outcome::Failed(reason) => {
                let msg = format!("fail\nCommand finished with error: {reason}");
                println!("{}", msg.if_supports_color(Stream::Stdout, |t| t.red()));
            }
        }

        report.results.push((name.to_string(), outcome));
    }

    Ok(report)
}

fn build_platform(config: &BuildConfig, platform: &Platform, out_dir: &Path) -> Outcome {
    let mut cmd = build_command(config, platform, out_dir);

    let args: Vec<String> = cmd
        .get_args()
        .map(|s| s.to_string_lossy().to_string())
        .collect();
    debug!(
        command = %config.compiler.display(),
        args = ?args,
        goos = platform.os,
        goarch = platform.arch,
        "Executing build"
    );

    match cmd.status() {
        Ok(status) if status.success() => Outcome::Success,
        Ok(status) => Outcome::Failed(status.to_string()),
        Err(err) => Outcome::Failed(err.to_string()),
    }
}

fn build_command(config: &BuildConfig, platform: &Platform, out_dir: &Path) -> Command {
    let mut cmd = Command::new(&config.compiler);
    cmd.arg("build").arg("-o").arg(out_dir);
    cmd.args(&config.build_args);
    cmd.envs(target_env(platform));
    cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    cmd
}
