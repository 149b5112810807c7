//! logmerge Binary
//!
//! Runs one merge pass from a config file and exits.

use std::path::PathBuf;

use clap::Parser;
use logmerge::{Config, MergeEngine};
use tracing_subscriber::{fmt, EnvFilter};

/// logmerge
#[derive(Parser, Debug)]
#[command(name = "logmerge")]
#[command(about = "Merge rotated scheduler log fragments into single log files")]
#[command(version)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logmerge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("logmerge v{}", logmerge::VERSION);
    tracing::info!("Config file: {}", args.config.display());

    // Fatal before any file is touched: missing config, bad field,
    // invalid pattern.
    let config = match Config::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let engine = MergeEngine::new(config);
    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "Merged {} stdout and {} stderr fragments, removed {} scheduler logs",
                summary.stdout_merged,
                summary.stderr_merged,
                summary.scheduler_removed
            );
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
