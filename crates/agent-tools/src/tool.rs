//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions that an agent calls through the tool-call protocol.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the agent understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Schema for a tool taking a stock code and a start date:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "stock_code": { "type": "string" },
    ///         "start_date": { "type": "string", "format": "date" }
    ///     },
    ///     "required": ["stock_code", "start_date"]
    /// });
    /// assert_eq!(schema["required"][0], "stock_code");
    /// ```
    fn input_schema(&self) -> Value;

    /// Describe the tool the way it is advertised to an agent
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Advertised form of a tool: what an agent sees before calling it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
