//! Tool executor with timeout protection

use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::tool::ToolRegistry;
use crate::tool_error::ToolError;
use crate::tool_result::ToolResult;

/// Executes tools from a registry with timeout protection.
///
/// 1. Looks the tool up by name
/// 2. Checks availability
/// 3. Executes under the tool's own timeout
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    /// Create a new executor with the given registry
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing this executor
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool by name with given arguments.
    pub async fn execute(
        &self,
        tool_name: &str,
        args: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let tool = self.registry.get(tool_name).ok_or_else(|| {
            warn!(tool = tool_name, "Tool not found");
            ToolError::not_found(tool_name)
        })?;

        if !tool.is_available() {
            warn!(tool = tool_name, "Tool is unavailable");
            return Err(ToolError::unavailable(
                tool_name,
                "Tool is currently disabled",
            ));
        }

        let tool_timeout = tool.timeout();
        let start = Instant::now();

        debug!(
            tool = tool_name,
            timeout_ms = tool_timeout.as_millis() as u64,
            "Executing tool"
        );

        let output = timeout(tool_timeout, tool.execute(args))
            .await
            .map_err(|_| {
                warn!(
                    tool = tool_name,
                    timeout_ms = tool_timeout.as_millis() as u64,
                    "Tool execution timed out"
                );
                ToolError::timeout(tool_name, tool_timeout.as_millis() as u64)
            })??;

        let elapsed = start.elapsed();
        debug!(
            tool = tool_name,
            execution_ms = elapsed.as_millis() as u64,
            "Tool execution complete"
        );

        Ok(ToolResult::new(tool_name, output, elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{Tool, ToolDefinition};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoTool {
        definition: ToolDefinition,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, args: Value) -> Result<Value, ToolError> {
            Ok(args)
        }
    }

    struct SlowTool {
        definition: ToolDefinition,
    }

    #[async_trait]
    impl Tool for SlowTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(json!("too late"))
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(20)
        }
    }

    fn executor_with(tool: Arc<dyn Tool>) -> ToolExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(tool);
        ToolExecutor::new(registry)
    }

    #[tokio::test]
    async fn test_execute_echo() {
        let executor = executor_with(Arc::new(EchoTool {
            definition: ToolDefinition::new("echo", "Echoes input", r#"{"type": "object"}"#),
        }));

        let result = executor.execute("echo", json!({"query": "hi"})).await.unwrap();
        assert_eq!(result.output, json!({"query": "hi"}));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let executor = ToolExecutor::new(ToolRegistry::new());
        let err = executor.execute("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_timeout_enforced() {
        let executor = executor_with(Arc::new(SlowTool {
            definition: ToolDefinition::new("slow", "Sleeps", r#"{"type": "object"}"#),
        }));

        let err = executor.execute("slow", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }
}
