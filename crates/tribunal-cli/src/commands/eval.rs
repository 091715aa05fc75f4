//! `tribunal eval` - batch-evaluate a JSONL dataset of cases

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use tribunal_jury::JuryConfig;

use crate::case::CaseRecord;
use crate::commands::{append_record, build_jury, print_info, print_success, print_warning};

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// JSONL dataset, one case per line
    #[arg(long)]
    pub dataset: PathBuf,

    /// Output JSONL file; one verdict record is appended per case
    #[arg(long)]
    pub output: PathBuf,

    /// Evaluate only the first N cases
    #[arg(long)]
    pub limit: Option<usize>,

    /// Jury size per case
    #[arg(long, default_value_t = 3)]
    pub arbiters: usize,

    /// Use the mock collaborator instead of OpenRouter
    #[arg(long)]
    pub mock: bool,
}

pub async fn run(args: EvalArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.dataset)
        .with_context(|| format!("reading dataset {}", args.dataset.display()))?;

    let mut cases = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CaseRecord>(line) {
            Ok(case) => cases.push(case),
            Err(e) => warn!(line = line_no + 1, error = %e, "Skipping malformed case"),
        }
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }

    print_info(&format!("Loaded {} cases", cases.len()));

    let jury = build_jury(args.mock, JuryConfig::default());

    let mut answered = 0usize;
    let mut scored = 0usize;
    let mut correct = 0usize;

    for (index, case) in cases.iter().enumerate() {
        let question = match case.question() {
            Ok(question) => question,
            Err(e) => {
                warn!(case = index, error = %e, "Skipping case with invalid question");
                continue;
            }
        };

        let verdict = jury
            .synthesize(&question, &case.context_passages, args.arbiters)
            .await;

        if verdict.final_verdict.is_some() {
            answered += 1;
        }
        if let Some(gold) = &case.gold_answer {
            scored += 1;
            let gold_key = gold.trim().to_uppercase();
            if verdict
                .final_verdict
                .map(|winner| winner.to_string() == gold_key)
                .unwrap_or(false)
            {
                correct += 1;
            }
        }

        let mut record = verdict.to_record();
        if let Some(map) = record.as_object_mut() {
            map.insert("id".to_string(), case.id_or(index));
            map.insert("question".to_string(), case.question.clone().into());
            if let Some(gold) = &case.gold_answer {
                map.insert("gold_answer".to_string(), gold.clone().into());
            }
            map.insert(
                "timestamp".to_string(),
                chrono::Utc::now().to_rfc3339().into(),
            );
        }
        append_record(&args.output, &record)?;
    }

    print_success(&format!(
        "Evaluated {} cases ({} answered) -> {}",
        cases.len(),
        answered,
        args.output.display()
    ));
    if scored > 0 {
        print_info(&format!(
            "Accuracy against gold answers: {}/{} ({:.1}%)",
            correct,
            scored,
            correct as f64 / scored as f64 * 100.0
        ));
    } else {
        print_warning("Dataset has no gold answers; accuracy not computed");
    }

    Ok(())
}
