//! Structured error types for tool execution

use thiserror::Error;

/// Error types for tool execution with a variant per failure mode.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry
    #[error("Tool '{name}' not found in registry")]
    NotFound {
        /// Name of the tool that was requested
        name: String,
    },

    /// Invalid arguments provided to tool
    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments {
        /// Name of the tool
        tool: String,
        /// Human-readable reason for validation failure
        reason: String,
    },

    /// Tool execution failed
    #[error("Execution of '{tool}' failed: {message}")]
    ExecutionFailed {
        /// Name of the tool
        tool: String,
        /// Error message
        message: String,
    },

    /// Tool execution exceeded timeout
    #[error("Tool '{tool}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the tool
        tool: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool is disabled or unavailable
    #[error("Tool '{name}' is currently unavailable: {reason}")]
    Unavailable {
        /// Name of the tool
        name: String,
        /// Reason for unavailability
        reason: String,
    },
}

impl ToolError {
    /// Create a NotFound error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an InvalidArguments error with context
    pub fn invalid_args(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExecutionFailed error
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a Timeout error
    pub fn timeout(tool: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            tool: tool.into(),
            timeout_ms,
        }
    }

    /// Create an Unavailable error
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_tool_name() {
        let err = ToolError::not_found("dense_search");
        assert!(err.to_string().contains("dense_search"));

        let err = ToolError::timeout("keyword_search", 30_000);
        assert!(err.to_string().contains("30000ms"));
    }
}
