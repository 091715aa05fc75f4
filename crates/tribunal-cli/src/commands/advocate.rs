//! `tribunal advocate` - gather supporting evidence for a hypothesis

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use tribunal_advocate::{Advocate, AdvocateConfig};
use tribunal_llm::MockProvider;
use tribunal_retrieval::{DenseIndex, KeywordIndex};

use crate::commands::{build_provider, print_info, print_warning};

#[derive(Debug, Args)]
pub struct AdvocateArgs {
    /// The legal hypothesis to find supporting evidence for
    pub hypothesis: String,

    /// Maximum evidence items to return
    #[arg(short, long, default_value_t = 3)]
    pub k: usize,

    /// Path to a JSONL keyword corpus
    #[arg(long)]
    pub keyword_index: Option<PathBuf>,

    /// Path to a dense vector file (requires --dense-metadata)
    #[arg(long)]
    pub dense_index: Option<PathBuf>,

    /// Path to the dense index metadata file
    #[arg(long)]
    pub dense_metadata: Option<PathBuf>,

    /// Use the mock collaborator instead of OpenRouter
    #[arg(long)]
    pub mock: bool,
}

pub async fn run(args: AdvocateArgs) -> Result<()> {
    let keyword = args.keyword_index.as_ref().and_then(|path| {
        match KeywordIndex::open(path) {
            Ok(index) => {
                print_info(&format!(
                    "Keyword index loaded from {} ({} documents)",
                    path.display(),
                    index.len()
                ));
                Some(Arc::new(index))
            }
            Err(e) => {
                // Disables the keyword tool only
                print_warning(&format!("Keyword index unavailable: {}", e));
                None
            }
        }
    });

    let dense = match (&args.dense_index, &args.dense_metadata) {
        (Some(index_path), Some(metadata_path)) => {
            if args.mock {
                match DenseIndex::open(index_path, metadata_path, Arc::new(MockProvider::constant("")))
                {
                    Ok(index) => {
                        print_info(&format!(
                            "Dense index loaded from {} ({} passages)",
                            index_path.display(),
                            index.len()
                        ));
                        Some(Arc::new(index))
                    }
                    Err(e) => {
                        print_warning(&format!("Dense index unavailable: {}", e));
                        None
                    }
                }
            } else {
                print_warning("No embedding collaborator configured; dense search disabled");
                None
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            print_warning("Dense search needs both --dense-index and --dense-metadata");
            None
        }
        (None, None) => None,
    };

    let advocate = Advocate::new(build_provider(args.mock), keyword, dense, AdvocateConfig::default());
    let capabilities = advocate.capabilities();
    if !capabilities.any() {
        print_warning("No retrieval tools available; the advocate will rely on reasoning alone");
    }

    let evidence = advocate.retrieve(&args.hypothesis, args.k).await;

    if evidence.is_empty() {
        print_warning("No evidence produced");
        return Ok(());
    }

    println!("\n{}", "Selected evidence:".bold());
    for item in &evidence {
        println!(
            "- {} {}",
            format!("[{}]", item.source).cyan(),
            item.text
        );
    }

    Ok(())
}
