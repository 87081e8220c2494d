//! wiki CLI - minimal file-backed wiki server.
//!
//! Provides commands for:
//! - `serve`: Start the wiki server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// wiki - minimal file-backed wiki server.
#[derive(Parser)]
#[command(name = "wiki", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => run_async(args.execute()),
    };

    if let Err(err) = result {
        output.error(err);
        std::process::exit(1);
    }
}

/// Drive an async command to completion on a fresh multi-threaded runtime.
fn run_async(
    command: impl std::future::Future<Output = Result<(), CliError>>,
) -> Result<(), CliError> {
    tokio::runtime::Runtime::new()?.block_on(command)
}
