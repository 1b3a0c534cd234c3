//! Tool router — registers and dispatches MCP tool calls.
//!
//! Each tool is a function that takes JSON arguments and returns a
//! [`ToolCallResult`]. The router owns the configured [`Comparator`] and
//! provides `list_tools()` / `call_tool()` for the MCP server.

pub mod analyze;
pub mod info;

use anyhow::Result;
use tracing::debug;

use crate::compare::Comparator;
use crate::server::{ToolCallResult, ToolDefinition};

/// Tool router that dispatches MCP tool calls to implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRouter {
    comparator: Comparator,
}

impl ToolRouter {
    /// Create a new tool router around a configured comparator.
    pub const fn new(comparator: Comparator) -> Self {
        Self { comparator }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![analyze::tool_definition(), info::tool_definition()]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be decoded or the result
    /// cannot be encoded. Unknown tools and unknown algorithms are reported
    /// as error results instead.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "analyze" => analyze::execute(&self.comparator, arguments),
            "info" => info::execute(&self.comparator),
            _ => Ok(ToolCallResult::error(format!("Unknown tool: {name}"))),
        }
    }
}
