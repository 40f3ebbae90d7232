//! sofia - causal extraction CLI
//!
//! Runs the extraction pipeline over pre-annotated documents and prints the
//! variable, entity, event and causal-relation records as JSON.
//!
//! # Usage
//!
//! ```bash
//! # All sentences, no query (every score is 0.0)
//! sofia extract annotations.json --pretty
//!
//! # Only sentences mentioning the queries, scored against them
//! sofia extract annotations.json -q rain -q "food prices" --source fews.pdf
//!
//! # Check that every sentence carries tokens, POS tags and dependencies
//! sofia validate annotations.json
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod output;

/// Causal extraction over pre-annotated sentences
#[derive(Parser)]
#[command(name = "sofia", author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities, events and causal relations
    #[command(visible_alias = "x")]
    Extract(commands::extract::ExtractArgs),

    /// Check annotation files for missing required layers
    Validate(commands::validate::ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Validate(args) => commands::validate::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
