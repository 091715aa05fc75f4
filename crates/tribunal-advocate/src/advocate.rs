//! Retrieval orchestrator: a bounded tool-using reasoning loop

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use tribunal_core::{EvidenceItem, EvidenceSource};
use tribunal_llm::{LlmProvider, LlmRequest, ToolExecutor, ToolRegistry};
use tribunal_retrieval::{DenseIndex, DenseSearchTool, KeywordIndex, KeywordSearchTool};

const ADVOCATE_ROLE: &str = "You are a legal advocate. Your goal is to find evidence to SUPPORT \
     a given hypothesis. You have access to retrieval tools to find relevant legal passages. \
     Use the tools to find passages that support the hypothesis.";

/// Which retrieval tools were registered at construction.
///
/// Computed once from the index handles that opened successfully; the loop
/// never discovers capabilities at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvocateCapabilities {
    pub has_keyword: bool,
    pub has_dense: bool,
}

impl AdvocateCapabilities {
    /// Whether any retrieval tool is registered
    pub fn any(&self) -> bool {
        self.has_keyword || self.has_dense
    }
}

/// Configuration for the advocate loop
#[derive(Debug, Clone)]
pub struct AdvocateConfig {
    /// Maximum reasoning rounds before the loop gives up
    pub max_rounds: usize,
    /// Passages each tool call may return
    pub passages_per_tool: usize,
    /// Sampling temperature for the reasoning collaborator
    pub temperature: f32,
    /// Output token bound per reasoning call
    pub max_tokens: u32,
}

impl Default for AdvocateConfig {
    fn default() -> Self {
        Self {
            max_rounds: 4,
            passages_per_tool: 3,
            temperature: 0.3,
            max_tokens: 2048,
        }
    }
}

/// What one reasoning response asked for
enum Directive {
    ToolCall { tool: String, query: String },
    Evidence(Value),
}

/// The advocate: wraps evidence retrieval behind a tool-using reasoning
/// loop.
pub struct Advocate {
    provider: Option<Arc<dyn LlmProvider>>,
    executor: ToolExecutor,
    capabilities: AdvocateCapabilities,
    config: AdvocateConfig,
}

impl Advocate {
    /// Build an advocate from whichever collaborators are configured.
    ///
    /// Index handles that failed to open are passed as `None`; the matching
    /// tool is simply not registered.
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        keyword: Option<Arc<KeywordIndex>>,
        dense: Option<Arc<DenseIndex>>,
        config: AdvocateConfig,
    ) -> Self {
        let capabilities = AdvocateCapabilities {
            has_keyword: keyword.is_some(),
            has_dense: dense.is_some(),
        };

        let mut registry = ToolRegistry::new();
        if let Some(index) = keyword {
            registry.register(Arc::new(KeywordSearchTool::new(
                index,
                config.passages_per_tool,
            )));
        }
        if let Some(index) = dense {
            registry.register(Arc::new(DenseSearchTool::new(
                index,
                config.passages_per_tool,
            )));
        }

        Self {
            provider,
            executor: ToolExecutor::new(registry),
            capabilities,
            config,
        }
    }

    /// Which tools this advocate can call
    pub fn capabilities(&self) -> AdvocateCapabilities {
        self.capabilities
    }

    /// Gather up to `k` supporting evidence items for `hypothesis`.
    ///
    /// Best-effort end to end: with no reasoning collaborator configured
    /// this returns an empty vec, tool failures become observations the
    /// loop can read past, and a provider failure ends the loop with no
    /// evidence. Never an error.
    pub async fn retrieve(&self, hypothesis: &str, k: usize) -> Vec<EvidenceItem> {
        let Some(provider) = &self.provider else {
            debug!("No reasoning collaborator configured, returning no evidence");
            return Vec::new();
        };

        info!(hypothesis = %truncate_for_log(hypothesis), "Advocate retrieving evidence");

        let mut observations = String::new();
        for round in 1..=self.config.max_rounds {
            let final_round = round == self.config.max_rounds;
            let prompt = self.build_prompt(hypothesis, &observations, final_round);
            let request = LlmRequest::with_role(ADVOCATE_ROLE, &prompt)
                .with_temperature(self.config.temperature)
                .with_max_tokens(self.config.max_tokens);

            let content = match provider.complete(request).await {
                Ok(response) => response.content,
                Err(e) => {
                    warn!(round, error = %e, "Reasoning collaborator failed");
                    return Vec::new();
                }
            };

            match parse_directive(&content) {
                Directive::Evidence(block) => return split_evidence(&block, k),
                Directive::ToolCall { tool, query } if !final_round => {
                    debug!(round, tool = %tool, query = %query, "Tool call");
                    let observation = match self
                        .executor
                        .execute(&tool, json!({ "query": query }))
                        .await
                    {
                        Ok(result) => result.output_text(),
                        // Tool failures become observations the loop can read past
                        Err(e) => format!("Tool error: {}", e),
                    };
                    observations
                        .push_str(&format!("\n[{} for '{}']\n{}\n", tool, query, observation));
                }
                Directive::ToolCall { .. } => {
                    // Out of rounds; nothing final was produced
                    warn!("Advocate exhausted reasoning rounds without final evidence");
                    return Vec::new();
                }
            }
        }

        Vec::new()
    }

    fn build_prompt(&self, hypothesis: &str, observations: &str, final_round: bool) -> String {
        let tool_lines = self
            .executor
            .registry()
            .definitions()
            .iter()
            .map(|d| d.prompt_line())
            .collect::<Vec<_>>()
            .join("\n");

        let instructions = if final_round || self.executor.registry().is_empty() {
            "Reply with JSON only: {\"evidence\": \"<supporting passages, one per line>\"}"
                .to_string()
        } else {
            format!(
                "To search, reply with JSON only: {{\"tool\": \"<name>\", \"query\": \"<search query>\"}}\n\
                 When you have gathered enough passages, reply with JSON only: \
                 {{\"evidence\": \"<supporting passages, one per line>\"}}\n\n\
                 Available tools:\n{}",
                tool_lines
            )
        };

        let observed = if observations.is_empty() {
            "(none yet)".to_string()
        } else {
            observations.to_string()
        };

        format!(
            "Hypothesis: {}\n\n{}\n\nObservations so far:\n{}",
            hypothesis, instructions, observed
        )
    }
}

/// Parse one reasoning response.
///
/// Defensive: a JSON object with `tool`/`query` is a tool call, one with
/// `evidence` is the final answer, and anything unparseable is treated as
/// an evidence block as-is.
fn parse_directive(content: &str) -> Directive {
    if let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) {
        if let Ok(value) = serde_json::from_str::<Value>(&content[start..=end]) {
            if let Some(evidence) = value.get("evidence") {
                return Directive::Evidence(evidence.clone());
            }
            if let (Some(tool), Some(query)) = (
                value.get("tool").and_then(Value::as_str),
                value.get("query").and_then(Value::as_str),
            ) {
                return Directive::ToolCall {
                    tool: tool.to_string(),
                    query: query.to_string(),
                };
            }
        }
    }
    Directive::Evidence(Value::String(content.to_string()))
}

/// Split an evidence block into individual passages, one item per
/// non-blank line, truncated to `k`.
fn split_evidence(block: &Value, k: usize) -> Vec<EvidenceItem> {
    let passages: Vec<String> = match block {
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(text) => text
            .lines()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        other => vec![other.to_string()],
    };

    passages
        .into_iter()
        .take(k)
        .map(|p| EvidenceItem::new(p, EvidenceSource::Advocate, 1.0))
        .collect()
}

fn truncate_for_log(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tribunal_llm::MockProvider;

    fn keyword_index() -> Arc<KeywordIndex> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"id": "1", "contents": "a landlord may not evict in retaliation for code complaints"}}"#
        )
        .unwrap();
        file.flush().unwrap();
        let index = KeywordIndex::open(file.path()).unwrap();
        // NamedTempFile is removed on drop; the index is already in memory
        drop(file);
        Arc::new(index)
    }

    #[tokio::test]
    async fn test_no_provider_returns_empty() {
        let advocate = Advocate::new(None, Some(keyword_index()), None, AdvocateConfig::default());
        let evidence = advocate.retrieve("retaliatory eviction is barred", 3).await;
        assert!(evidence.is_empty());
    }

    #[tokio::test]
    async fn test_failing_provider_returns_empty() {
        let advocate = Advocate::new(
            Some(Arc::new(MockProvider::failing())),
            Some(keyword_index()),
            None,
            AdvocateConfig::default(),
        );
        let evidence = advocate.retrieve("retaliatory eviction is barred", 3).await;
        assert!(evidence.is_empty());
    }

    #[tokio::test]
    async fn test_tool_call_then_evidence() {
        let provider = MockProvider::new(vec![
            r#"{"tool": "keyword_search", "query": "retaliation eviction"}"#.to_string(),
            r#"{"evidence": "A landlord may not evict in retaliation.\n\nRetaliatory eviction is an affirmative defense."}"#.to_string(),
        ]);
        let advocate = Advocate::new(
            Some(Arc::new(provider)),
            Some(keyword_index()),
            None,
            AdvocateConfig::default(),
        );

        let evidence = advocate.retrieve("retaliatory eviction is barred", 3).await;
        assert_eq!(evidence.len(), 2);
        assert!(evidence
            .iter()
            .all(|e| e.source == EvidenceSource::Advocate && e.score == 1.0));
    }

    #[tokio::test]
    async fn test_evidence_truncated_to_k() {
        let provider = MockProvider::constant(r#"{"evidence": "one\ntwo\nthree\nfour"}"#);
        let advocate = Advocate::new(Some(Arc::new(provider)), None, None, AdvocateConfig::default());

        let evidence = advocate.retrieve("hypothesis", 2).await;
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].text, "one");
        assert_eq!(evidence[1].text, "two");
    }

    #[tokio::test]
    async fn test_plain_text_response_is_evidence() {
        let provider = MockProvider::constant("Passage about eviction law.\nAnother passage.");
        let advocate = Advocate::new(Some(Arc::new(provider)), None, None, AdvocateConfig::default());

        let evidence = advocate.retrieve("hypothesis", 5).await;
        assert_eq!(evidence.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_degrades_and_loop_continues() {
        let provider = MockProvider::new(vec![
            r#"{"tool": "faiss_search", "query": "eviction"}"#.to_string(),
            r#"{"evidence": "Recovered passage."}"#.to_string(),
        ]);
        let advocate = Advocate::new(Some(Arc::new(provider)), None, None, AdvocateConfig::default());

        let evidence = advocate.retrieve("hypothesis", 3).await;
        assert_eq!(evidence.len(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_rounds_returns_empty() {
        // Mock keeps asking for tools and never yields evidence
        let provider =
            MockProvider::constant(r#"{"tool": "keyword_search", "query": "eviction"}"#);
        let advocate = Advocate::new(
            Some(Arc::new(provider)),
            Some(keyword_index()),
            None,
            AdvocateConfig::default(),
        );

        let evidence = advocate.retrieve("hypothesis", 3).await;
        assert!(evidence.is_empty());
    }

    #[test]
    fn test_capabilities_reflect_handles() {
        let advocate = Advocate::new(None, Some(keyword_index()), None, AdvocateConfig::default());
        assert!(advocate.capabilities().has_keyword);
        assert!(!advocate.capabilities().has_dense);
        assert!(advocate.capabilities().any());
    }

    #[test]
    fn test_split_evidence_from_array() {
        let block = serde_json::json!(["first", "  ", "second"]);
        let items = split_evidence(&block, 5);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "second");
    }
}
