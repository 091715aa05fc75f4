//! Result type for tool executions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Outcome of one tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the executed tool
    pub tool: String,
    /// The tool's output as JSON
    pub output: Value,
    /// Wall-clock execution time in milliseconds
    pub execution_ms: u64,
}

impl ToolResult {
    /// Create a result from an execution
    pub fn new(tool: impl Into<String>, output: Value, elapsed: Duration) -> Self {
        Self {
            tool: tool.into(),
            output,
            execution_ms: elapsed.as_millis() as u64,
        }
    }

    /// The output rendered as text, the way the reasoning loop consumes it
    pub fn output_text(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_text_unwraps_strings() {
        let result = ToolResult::new("keyword_search", json!("[Keyword] passage"), Duration::ZERO);
        assert_eq!(result.output_text(), "[Keyword] passage");
    }

    #[test]
    fn test_output_text_renders_structures() {
        let result = ToolResult::new("dense_search", json!({"hits": 0}), Duration::ZERO);
        assert_eq!(result.output_text(), r#"{"hits":0}"#);
    }
}
