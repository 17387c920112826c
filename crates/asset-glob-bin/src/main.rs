use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::commands::{ExplainCommand, ResolveCommand};

mod commands;
mod config;

/// Resolve extended glob patterns into the files and directories they select
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Change to this directory before doing anything
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve glob patterns and print the matching files and directories
    Resolve(ResolveCommand),

    /// Show how glob patterns are compiled without touching the filesystem
    Explain(ExplainCommand),
}

/// Entry point of the `asset-glob` cli.
fn main() -> anyhow::Result<()> {
    // Parse the command line arguments
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.verbose.tracing_level_filter().into())
        .from_env()?;

    // Setup the tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish()
        .try_init()?;

    if let Some(directory) = &cli.directory {
        std::env::set_current_dir(directory)
            .with_context(|| format!("failed to change directory to {}", directory.display()))?;
    }

    // Dispatch the selected command
    match cli.command {
        Commands::Resolve(cmd) => cmd.run(),
        Commands::Explain(cmd) => cmd.run(),
    }
}
