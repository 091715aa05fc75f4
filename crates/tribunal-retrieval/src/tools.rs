//! Retrieval tools offered to the advocate's reasoning loop
//!
//! Each wrapper surfaces up to `k` labeled passage previews as one text
//! block. Failures never propagate: an unusable collaborator produces a
//! descriptive string result the reasoning loop can read and move past.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use tribunal_llm::{Tool, ToolDefinition, ToolError};

use crate::dense::DenseIndex;
use crate::keyword::KeywordIndex;

/// Passage preview length surfaced to the reasoning loop, bounding prompt
/// size
pub const PREVIEW_CHARS: usize = 300;

const KEYWORD_SEARCH: ToolDefinition = ToolDefinition::new(
    "keyword_search",
    "Search for passages using keyword search. Give keywords as the query.",
    r#"{"type": "object", "properties": {"query": {"type": "string"}}, "required": ["query"]}"#,
);

const DENSE_SEARCH: ToolDefinition = ToolDefinition::new(
    "dense_search",
    "Search for passages using dense vector semantic search. Give a natural language query.",
    r#"{"type": "object", "properties": {"query": {"type": "string"}}, "required": ["query"]}"#,
);

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    }
}

fn query_arg(tool: &str, args: &Value) -> Result<String, ToolError> {
    args.get("query")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::invalid_args(tool, "missing string field 'query'"))
}

/// Keyword retrieval tool backed by a loaded [`KeywordIndex`]
pub struct KeywordSearchTool {
    index: Arc<KeywordIndex>,
    k: usize,
}

impl KeywordSearchTool {
    /// Wrap an opened index; `k` bounds the passages per call
    pub fn new(index: Arc<KeywordIndex>, k: usize) -> Self {
        Self { index, k }
    }
}

#[async_trait]
impl Tool for KeywordSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &KEYWORD_SEARCH
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let query = query_arg(KEYWORD_SEARCH.name, &args)?;
        let hits = self.index.search(&query, self.k);
        if hits.is_empty() {
            return Ok(Value::String("No passages matched the query.".to_string()));
        }
        let block = hits
            .iter()
            .map(|hit| format!("[Keyword] {}", preview(&hit.text)))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Value::String(block))
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(10)
    }
}

/// Dense retrieval tool backed by a loaded [`DenseIndex`]
pub struct DenseSearchTool {
    index: Arc<DenseIndex>,
    k: usize,
}

impl DenseSearchTool {
    /// Wrap an opened index; `k` bounds the passages per call
    pub fn new(index: Arc<DenseIndex>, k: usize) -> Self {
        Self { index, k }
    }
}

#[async_trait]
impl Tool for DenseSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &DENSE_SEARCH
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let query = query_arg(DENSE_SEARCH.name, &args)?;
        // Embedding failures degrade to an explanatory result
        let hits = match self.index.search(&query, self.k).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Dense search failed");
                return Ok(Value::String(format!("Error in dense search: {}", e)));
            }
        };
        if hits.is_empty() {
            return Ok(Value::String("No passages matched the query.".to_string()));
        }
        let block = hits
            .iter()
            .map(|hit| format!("[Dense] {}", preview(&hit.text)))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Value::String(block))
    }
}
