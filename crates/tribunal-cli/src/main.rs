//! Tribunal CLI - multi-agent legal question answering
//!
//! # Usage
//!
//! ```bash
//! # Deliberate on a case file
//! tribunal deliberate --case case.json --arbiters 3
//!
//! # Gather supporting evidence for a hypothesis
//! tribunal advocate "A landlord cannot evict a tenant for reporting code violations." \
//!     --keyword-index corpus.jsonl
//!
//! # Batch-evaluate a JSONL dataset
//! tribunal eval --dataset barexam_qa.jsonl --output verdicts.jsonl --limit 10
//!
//! # Show configuration and collaborator status
//! tribunal info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod case;
mod commands;

use commands::{advocate, deliberate, eval, info};

/// Tribunal - advocate retrieval and persona jury deliberation
///
/// An advocate agent gathers supporting passages through keyword and dense
/// retrieval; a jury of persona-conditioned agents votes on multiple-choice
/// legal questions and aggregates the votes into a verdict.
#[derive(Parser)]
#[command(
    name = "tribunal",
    version,
    about = "Tribunal CLI - multi-agent legal question answering"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a jury deliberation on one case
    #[command(name = "deliberate")]
    Deliberate(deliberate::DeliberateArgs),

    /// Gather supporting evidence for a hypothesis
    #[command(name = "advocate")]
    Advocate(advocate::AdvocateArgs),

    /// Batch-evaluate a JSONL dataset of cases
    #[command(name = "eval")]
    Eval(eval::EvalArgs),

    /// Show configuration and collaborator status
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Deliberate(args) => deliberate::run(args).await,
        Commands::Advocate(args) => advocate::run(args).await,
        Commands::Eval(args) => eval::run(args).await,
        Commands::Info(args) => info::run(args),
    }
}

/// Setup tracing based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}
