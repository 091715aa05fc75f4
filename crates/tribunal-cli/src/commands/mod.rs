//! CLI subcommands

pub mod advocate;
pub mod deliberate;
pub mod eval;
pub mod info;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use tribunal_jury::{JuryConfig, JuryCoordinator};
use tribunal_llm::{LlmConfig, LlmProvider, MockProvider, OpenRouterProvider};

/// Build the reasoning collaborator, or `None` when nothing usable is
/// configured. The pipeline degrades to "no answer produced" rather than
/// failing.
pub fn build_provider(mock: bool) -> Option<Arc<dyn LlmProvider>> {
    if mock {
        return Some(Arc::new(MockProvider::juror(&["B", "A", "B", "C", "D"])));
    }

    let config = LlmConfig::from_env();
    match OpenRouterProvider::from_config(&config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            print_warning(&format!("{} - running without a reasoning collaborator", e));
            None
        }
    }
}

/// Build a jury around whichever collaborator is available
pub fn build_jury(mock: bool, config: JuryConfig) -> JuryCoordinator {
    match build_provider(mock) {
        Some(provider) => JuryCoordinator::new(provider, config),
        None => JuryCoordinator::detached(config),
    }
}

/// Append one JSON record as a line to a JSONL file
pub fn append_record(path: &Path, record: &serde_json::Value) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening output file {}", path.display()))?;
    writeln!(file, "{}", record).with_context(|| format!("writing to {}", path.display()))?;
    Ok(())
}

/// Print a success message with a checkmark
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}
