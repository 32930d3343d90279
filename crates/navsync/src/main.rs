//! navsync CLI - keep a docs navigation tree in sync with generated reference pages.
//!
//! Provides commands for:
//! - `sync`: Rewrite the reference section of `mkdocs.yml` if the page set changed
//! - `paths`: Show the resolved input and output locations

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PathsArgs, SyncArgs};
use output::Output;

/// navsync - Reference navigation synchronizer.
#[derive(Parser)]
#[command(name = "navsync", version, about)]
struct Cli {
    /// Show debug output (discovered pages and individual changes).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the reference section of the navigation document.
    Sync(SyncArgs),
    /// Print resolved paths without changing anything.
    Paths(PathsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sync(args) => args.execute(&output),
        Commands::Paths(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
