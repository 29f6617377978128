//! CLI for the apps directory generator.
//!
//! Lists an organization's `App-*` repositories and regenerates the directory
//! README from them.

use apps_directory::{
    DirectoryConfig, GitHubToken, RunSummary, Runner, RunnerConfig, RunnerError, WriteTransport,
    TOKEN_ENV,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Apps Directory - Regenerate the directory README from the organization's App-* repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a directory.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token (classic, `ghp_...`).
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Write transport: `content-api` or `working-copy`.
    #[arg(long)]
    transport: Option<WriteTransport>,

    /// Local clone used by the working-copy transport.
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Print the regenerated README without writing it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    init_tracing();

    let args = Args::parse();

    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::from(1);
        }
    };

    match run(config).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) if e.is_config_error() => {
            eprintln!("❌ {e}");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr in compact single-line form so stdout only carries the
/// dry-run preview and the summary. The level comes from `RUST_LOG` and
/// defaults to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Validates the token and merges the config file with command line overrides.
fn build_config(args: Args) -> Result<RunnerConfig, RunnerError> {
    let token = GitHubToken::parse(args.token)?;

    let mut directory = match &args.config {
        Some(path) => DirectoryConfig::load(path)?,
        None => DirectoryConfig::default(),
    };
    if let Some(transport) = args.transport {
        directory.transport = transport;
    }
    if let Some(workdir) = args.workdir {
        directory.workdir = workdir;
    }
    directory.validate(args.config.as_deref().unwrap_or(Path::new("<command line>")))?;

    Ok(RunnerConfig::new(directory, token).with_dry_run(args.dry_run))
}

/// Main execution logic.
async fn run(config: RunnerConfig) -> Result<RunSummary, RunnerError> {
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Transport: {}", summary.transport);
    println!("  Apps listed: {}", summary.apps_listed);
    println!("  {}", summary.describe());
}
