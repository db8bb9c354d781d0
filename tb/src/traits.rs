//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Description shown to the model; owned because some tools build it
    /// from runtime state (e.g. a registry listing)
    fn description(&self) -> String;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value) -> ToolResult;
}

/// Result of a tool execution
///
/// Tools never return a Rust error to the loop: failures become descriptive
/// text with `is_error` set, so the model can read and recover from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}
