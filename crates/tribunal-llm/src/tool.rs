//! Tool definitions and registry for the advocate's reasoning loop
//!
//! This module provides:
//! - [`ToolDefinition`] - Metadata describing a tool's interface
//! - [`Tool`] trait - The core interface all tools must implement
//! - [`ToolRegistry`] - Registration and lookup of tools
//!
//! Which tools get registered is decided once at construction time from the
//! retrieval capabilities that are actually available; the registry never
//! changes during a reasoning loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::tool_error::ToolError;

/// Definition of a tool that can be called by an LLM.
///
/// Holds the metadata about a tool: its name, description, and JSON Schema
/// for parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (used in tool calling)
    /// Must be unique within a registry
    pub name: &'static str,
    /// Human-readable description of what the tool does
    pub description: &'static str,
    /// JSON Schema for the tool's parameters
    pub parameters: &'static str,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub const fn new(
        name: &'static str,
        description: &'static str,
        parameters: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            parameters,
        }
    }

    /// One-line rendering for inclusion in a reasoning prompt
    pub fn prompt_line(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

/// The core Tool trait.
///
/// Tools are the bridge between the reasoning loop and the retrieval
/// collaborators. Implementations must never panic on bad input; failures
/// are surfaced as [`ToolError`] or as descriptive string output.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's metadata (name, description, schema)
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with given arguments.
    ///
    /// `args` is a JSON value matching the tool's parameter schema.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;

    /// Execution timeout.
    fn timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    /// Whether the tool is currently available.
    fn is_available(&self) -> bool {
        true
    }
}

/// Registry for the tools offered to one reasoning loop.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Returns `true` if the tool was added, `false` if a tool with that
    /// name already exists. Collisions are rejected to keep tool dispatch
    /// unambiguous.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let name = tool.definition().name.to_string();
        if self.tools.contains_key(&name) {
            tracing::warn!("Tool '{}' already registered, skipping duplicate", name);
            return false;
        }
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// List all tool definitions
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
