//! Jury coordinator: sample, deliberate, tally

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use tribunal_core::{format_documents, EvidenceItem, Question};
use tribunal_llm::{LlmProvider, LlmRequest};

use crate::persona::{Persona, PersonaRegistry};
use crate::verdict::{Ballot, Verdict};

const ARBITER_ROLE_PREAMBLE: &str =
    "You are a specialized legal agent with a specific persona. \
     Evaluate the multiple choice question using only the retrieved evidence.";

/// What the juror is asked to return
#[derive(Debug, Deserialize)]
struct ArbiterResponse {
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    vote: String,
}

/// Configuration for one jury
#[derive(Debug, Clone)]
pub struct JuryConfig {
    /// Per-juror invocation timeout; a timed-out juror abstains
    pub juror_timeout: Duration,
    /// Sampling temperature for juror reasoning
    pub temperature: f32,
    /// Output token bound per juror
    pub max_tokens: u32,
}

impl Default for JuryConfig {
    fn default() -> Self {
        Self {
            juror_timeout: Duration::from_secs(60),
            temperature: 0.3,
            max_tokens: 2048,
        }
    }
}

/// Conducts one deliberation: a random subset of personas reviews the
/// evidence and votes.
pub struct JuryCoordinator {
    provider: Option<Arc<dyn LlmProvider>>,
    config: JuryConfig,
}

impl JuryCoordinator {
    /// Create a coordinator backed by a reasoning collaborator
    pub fn new(provider: Arc<dyn LlmProvider>, config: JuryConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// Create a coordinator with no reasoning collaborator.
    ///
    /// Every deliberation yields a no-votes verdict with an abstaining
    /// transcript; the host keeps running.
    pub fn detached(config: JuryConfig) -> Self {
        Self {
            provider: None,
            config,
        }
    }

    /// Deliberate on `question` given loosely typed evidence.
    ///
    /// Evidence elements may be raw strings (possibly JSON documents with a
    /// `contents` field) or objects with `contents`/`text` fields, as they
    /// appear in datasets and in advocate output.
    pub async fn synthesize(
        &self,
        question: &Question,
        evidence: &[Value],
        num_arbiters: usize,
    ) -> Verdict {
        let evidence_block = format_documents(evidence);
        let options_block = question.options_block();

        let selected = PersonaRegistry::sample(num_arbiters);
        info!(
            jurors = ?selected.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "Jury selected"
        );

        let Some(provider) = &self.provider else {
            warn!("No reasoning collaborator configured; jury abstains");
            let ballots = selected
                .iter()
                .map(|p| Ballot::abstaining(p.name(), "Reasoning collaborator not configured."))
                .collect();
            return Verdict::from_ballots(ballots);
        };

        // Jurors are mutually independent; run them concurrently and
        // collect in selection order to keep the tie-break deterministic.
        let deliberations = selected.iter().map(|persona| {
            self.deliberate(provider.clone(), *persona, question, &options_block, &evidence_block)
        });
        let ballots = futures::future::join_all(deliberations).await;

        Verdict::from_ballots(ballots)
    }

    /// Deliberate on typed evidence items (advocate output)
    pub async fn synthesize_items(
        &self,
        question: &Question,
        evidence: &[EvidenceItem],
        num_arbiters: usize,
    ) -> Verdict {
        let values: Vec<Value> = evidence.iter().map(EvidenceItem::to_value).collect();
        self.synthesize(question, &values, num_arbiters).await
    }

    async fn deliberate(
        &self,
        provider: Arc<dyn LlmProvider>,
        persona: Persona,
        question: &Question,
        options_block: &str,
        evidence_block: &str,
    ) -> Ballot {
        let system = format!("{}\n\n{}", ARBITER_ROLE_PREAMBLE, persona.instruction());
        let prompt = juror_prompt(question, options_block, evidence_block);
        let request = LlmRequest::with_role(&system, &prompt)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        match tokio::time::timeout(self.config.juror_timeout, provider.complete(request)).await {
            Ok(Ok(response)) => {
                let (reasoning, raw_vote) = parse_arbiter_response(&response.content);
                let vote = extract_vote(&raw_vote, &question.choices);
                if vote.is_none() {
                    warn!(persona = persona.name(), raw_vote = %raw_vote, "No valid option letter in vote");
                }
                Ballot::new(persona.name(), vote, reasoning)
            }
            Ok(Err(e)) => {
                warn!(persona = persona.name(), error = %e, "Juror invocation failed");
                Ballot::abstaining(persona.name(), format!("Juror invocation failed: {}", e))
            }
            Err(_) => {
                warn!(
                    persona = persona.name(),
                    timeout_ms = self.config.juror_timeout.as_millis() as u64,
                    "Juror invocation timed out"
                );
                Ballot::abstaining(
                    persona.name(),
                    format!(
                        "Juror invocation timed out after {}ms",
                        self.config.juror_timeout.as_millis()
                    ),
                )
            }
        }
    }
}

fn juror_prompt(question: &Question, options_block: &str, evidence_block: &str) -> String {
    format!(
        "Question: {}\n\nOptions:\n{}\n\nEvidence:\n{}\n\n\
         Reply with JSON only: {{\"reasoning\": \"<why your persona supports this vote>\", \
         \"vote\": \"<best option letter>\"}}",
        question.text, options_block, evidence_block
    )
}

/// Split a juror reply into (reasoning, raw vote).
///
/// Tries the requested JSON shape first; falls back to a `VOTE:` marker
/// line, then to the last non-empty line. The full reply is kept as the
/// reasoning whenever the JSON shape is absent.
fn parse_arbiter_response(content: &str) -> (String, String) {
    if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
        if end > start {
            if let Ok(response) = serde_json::from_str::<ArbiterResponse>(&content[start..=end]) {
                return (response.reasoning, response.vote);
            }
        }
    }

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(prefix) = trimmed.get(..4) {
            if prefix.eq_ignore_ascii_case("vote") {
                let raw = trimmed[4..].trim_start_matches([':', '-', ' ']);
                return (content.to_string(), raw.to_string());
            }
        }
    }

    let last_line = content
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    (content.to_string(), last_line.to_string())
}

/// Extract a vote from raw collaborator output: trim, upper-case, then
/// accept the first character that is a valid choice key. No valid key
/// means the juror abstains.
pub fn extract_vote(raw: &str, choices: &BTreeMap<char, String>) -> Option<char> {
    raw.trim()
        .to_uppercase()
        .chars()
        .find(|c| choices.contains_key(c))
}
