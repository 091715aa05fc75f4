//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::provider::{EmbeddingProvider, LlmError, LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns predefined responses.
/// Lets the advocate loop and jury deliberations run deterministically
/// without actual LLM access.
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Canned responses (cycles through them)
    responses: Vec<String>,
    /// Current response index
    index: AtomicUsize,
    /// Every call fails with [`LlmError::NotAvailable`]
    failing: bool,
}

impl MockProvider {
    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            failing: false,
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock whose every completion fails, for degraded-path tests
    pub fn failing() -> Self {
        Self {
            name: "failing-mock".to_string(),
            responses: vec![],
            index: AtomicUsize::new(0),
            failing: true,
        }
    }

    /// Create a mock juror that cycles through votes, replying in the
    /// structured format the jury coordinator requests
    pub fn juror(votes: &[&str]) -> Self {
        Self::new(
            votes
                .iter()
                .map(|vote| {
                    format!(
                        r#"{{"reasoning": "The evidence supports this option.", "vote": "{}"}}"#,
                        vote
                    )
                })
                .collect(),
        )
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.failing
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();

        if self.failing {
            return Err(LlmError::NotAvailable);
        }

        let content = if self.responses.is_empty() {
            format!("Acknowledged: {}", &request.prompt[..request.prompt.len().min(50)])
        } else {
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            self.responses[idx % self.responses.len()].clone()
        };

        Ok(LlmResponse {
            content,
            model: self.name.clone(),
            tokens_used: Some((request.prompt.len() / 4) as u32 + 100),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for MockProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        if self.failing {
            return Err(LlmError::NotAvailable);
        }
        // Deterministic toy embedding: bag of character codes folded into 8 dims
        let mut vector = vec![0.0f32; 8];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % 8] += byte as f32 / 255.0;
        }
        Ok(vector)
    }
}
