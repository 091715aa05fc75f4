//! `tribunal deliberate` - run one jury deliberation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::Table;

use tribunal_jury::{JuryConfig, Verdict};

use crate::case::CaseRecord;
use crate::commands::{append_record, build_jury, print_info, print_success, print_warning};

#[derive(Debug, Args)]
pub struct DeliberateArgs {
    /// Path to a case JSON file (question, choices, context_passages)
    #[arg(long)]
    pub case: PathBuf,

    /// Jury size (clamped to the number of personas)
    #[arg(long, default_value_t = 3)]
    pub arbiters: usize,

    /// Use the mock collaborator instead of OpenRouter
    #[arg(long)]
    pub mock: bool,

    /// Append the verdict record to this JSONL file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: DeliberateArgs) -> Result<()> {
    let case = CaseRecord::load(&args.case)?;
    let question = case.question()?;

    print_info(&format!("Question: {}", question.text));

    let jury = build_jury(args.mock, JuryConfig::default());
    let verdict = jury
        .synthesize(&question, &case.context_passages, args.arbiters)
        .await;

    print_verdict(&verdict);

    if let Some(gold) = &case.gold_answer {
        let gold_key = gold.trim().to_uppercase();
        match verdict.final_verdict {
            Some(winner) if winner.to_string() == gold_key => {
                print_success(&format!("Matches gold answer {}", gold_key))
            }
            _ => print_warning(&format!("Gold answer was {}", gold_key)),
        }
    }

    if let Some(path) = args.output {
        append_record(&path, &verdict.to_record())?;
        print_success(&format!("Verdict appended to {}", path.display()));
    }

    Ok(())
}

/// Print a verdict: headline, breakdown table, then the transcript
pub fn print_verdict(verdict: &Verdict) {
    match verdict.final_verdict {
        Some(winner) => println!(
            "\n{} {} (confidence {:.2})",
            "Final verdict:".bold(),
            winner.to_string().green().bold(),
            verdict.confidence
        ),
        None => println!("\n{} {}", "Final verdict:".bold(), "no consensus".red()),
    }

    if !verdict.vote_breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Choice", "Votes"]);
        for (key, count) in &verdict.vote_breakdown {
            table.add_row(vec![key.to_string(), count.to_string()]);
        }
        println!("{table}");
    }

    for ballot in &verdict.deliberations {
        let vote = ballot
            .vote
            .map(|v| v.to_string())
            .unwrap_or_else(|| "abstained".to_string());
        println!("\n[{}] voted {}", ballot.persona.bold(), vote.cyan());
        println!("{}", ballot.reasoning.dimmed());
    }
}
