// this_file: crates/labelhost-cli/src/main.rs

//! labelhost CLI: the native side of the label printing UI.
//!
//! Logs go to stderr so stdout stays free for the message channel.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        match &cli.command {
            Commands::Serve(args) => commands::serve::run(args).await,
            Commands::Measure(args) => commands::measure::run(args).await,
            Commands::Rasterize(args) => commands::rasterize::run(args).await,
        }
    })
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
