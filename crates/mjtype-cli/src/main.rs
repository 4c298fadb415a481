//! # mjtype CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mjtype_cli::check::{run_check, CheckArgs};
use mjtype_cli::explain::{run_explain, ExplainArgs};
use mjtype_cli::validate::{run_validate, ValidateArgs};
use mjtype_cli::EXIT_ERROR;

/// Constrained unit-value types for markup attributes.
///
/// Checks values such as `10px 5px` against declarations such as
/// `unit(px,em){1,4}`, and validates component attributes against a schema.
#[derive(Parser, Debug)]
#[command(name = "mjtype", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate values against a specification string.
    Check(CheckArgs),

    /// Show the parsed form and compiled pattern of a specification string.
    Explain(ExplainArgs),

    /// Validate a component's attributes against a schema file.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mjtype starting");

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &mut stdout),
        Commands::Explain(args) => run_explain(args, &mut stdout),
        Commands::Validate(args) => run_validate(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
