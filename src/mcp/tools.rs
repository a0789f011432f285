//! MCP tool registry
//!
//! Maps each tool name to its definition and a stateless handler. The
//! registry is built once at startup and owned by the server.

use std::collections::BTreeMap;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::Value;

use crate::error::McpError;
use crate::logging::LogContext;
use crate::mcp::types::{CallToolResult, Tool};
use crate::ranger::args::{AnyRequestArgs, InputArgs, NoArgs, OptionsArgs, ParamsArgs};
use crate::ranger::responder;

/// Signature shared by every tool handler
pub type ToolFn = fn(&LogContext, Value) -> CallToolResult;

struct RegisteredTool {
    definition: Tool,
    handler: ToolFn,
}

/// Tool registry
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry holding the six Ranger tools
    pub fn ranger() -> Self {
        let mut registry = Self::new();

        registry.register(
            tool_def::<NoArgs>("ranger", "A tool that responds with \"Ranger!\" to any question or request."),
            responder::ranger,
        );
        registry.register(
            tool_def::<InputArgs>("ranger_with_input", "A tool that accepts user input but always responds with \"Ranger!\"."),
            responder::ranger_with_input,
        );
        registry.register(
            tool_def::<NoArgs>("ranger_json", "A tool that responds with \"Ranger!\" in JSON format."),
            responder::ranger_json,
        );
        registry.register(
            tool_def::<OptionsArgs>("ranger_with_options", "A tool that returns variations of the Ranger response based on different options."),
            responder::ranger_with_options,
        );
        registry.register(
            tool_def::<ParamsArgs>("ranger_with_params", "A tool that accepts parameters but ignores them and always responds with \"Ranger!\"."),
            responder::ranger_with_params,
        );
        registry.register(
            tool_def::<AnyRequestArgs>("any_request", "A generic tool that responds with \"Ranger!\" to any request."),
            responder::any_request,
        );

        registry
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&mut self, definition: Tool, handler: ToolFn) {
        tracing::debug!(tool = %definition.name, "registering tool");
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                handler,
            },
        );
    }

    /// List all available tools, ordered by name
    pub fn list(&self) -> Vec<Tool> {
        self.tools.values().map(|t| t.definition.clone()).collect()
    }

    /// Call a tool by name
    pub fn call(&self, log: &LogContext, name: &str, args: Value) -> CallToolResult {
        match self.tools.get(name) {
            Some(tool) => (tool.handler)(log, args),
            None => CallToolResult::error(
                McpError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            ),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn tool_def<T: JsonSchema>(name: &str, description: &str) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema: input_schema::<T>(),
    }
}

/// JSON Schema for an argument struct. `ArgValue` is recursive, so it stays
/// under `definitions` rather than being inlined.
fn input_schema<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|s| s.meta_schema = None)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();

    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
