//! `tribunal info` - show configuration and collaborator status

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use tribunal_jury::PersonaRegistry;
use tribunal_llm::LlmConfig;

#[derive(Debug, Args)]
pub struct InfoArgs {}

pub fn run(_args: InfoArgs) -> Result<()> {
    let config = LlmConfig::from_env();

    println!("{} {}", "tribunal".bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("{}", "Reasoning collaborator".bold());
    println!("  model:    {}", config.model);
    println!("  endpoint: {}", config.base_url);
    println!(
        "  api key:  {}",
        if config.is_configured() {
            "configured (OPENROUTER_API_KEY)".green()
        } else {
            "not configured".red()
        }
    );
    println!("  max output tokens: {}", config.max_tokens);
    println!();

    println!("{}", "Jury personas".bold());
    for persona in PersonaRegistry::all() {
        println!("  - {}", persona.name());
    }

    Ok(())
}
