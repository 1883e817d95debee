//! Tool registry for MCP operations
//!
//! Tools are declared once, each with its own schema, and dispatched by name.
//! Both transports list and call tools through the same registry.

use super::error_handling::ToolError;
use super::responses::ToolOutcome;
use super::tool_handlers::ToolHandlers;
use super::widgets::{WidgetCatalog, WidgetTemplate};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// The tool handlers instance containing the business logic
    pub tool_handlers: Arc<ToolHandlers>,
    /// Widget templates resolved against the public base URL
    pub widgets: Arc<WidgetCatalog>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(tool_handlers: Arc<ToolHandlers>, widgets: Arc<WidgetCatalog>) -> Self {
        Self {
            tool_handlers,
            widgets,
        }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> Value;

    /// Template the tool's results render with, if any
    fn output_template(&self) -> Option<WidgetTemplate> {
        None
    }

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<ToolOutcome, ToolError>;
}

/// Registry for managing MCP tools
///
/// Listing order is registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool in the registry
    ///
    /// Registering a name twice replaces the earlier tool in place.
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Box::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Tool descriptors for a `tools/list` response
    ///
    /// `{name, description, inputSchema}`, plus `_meta` naming the output
    /// template for tools that have one.
    pub fn descriptors(&self, widgets: &WidgetCatalog) -> Vec<Value> {
        self.iter()
            .map(|tool| {
                let mut descriptor = Map::new();
                descriptor.insert("name".to_string(), Value::from(tool.name()));
                descriptor.insert("description".to_string(), Value::from(tool.description()));
                descriptor.insert("inputSchema".to_string(), tool.schema());
                if let Some(template) = tool.output_template() {
                    descriptor.insert(
                        "_meta".to_string(),
                        Value::Object(widgets.descriptor_meta(template)),
                    );
                }
                Value::Object(descriptor)
            })
            .collect()
    }

    /// Look up `name` and run it
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<ToolOutcome, ToolError> {
        let tool = self
            .get_tool(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!("Dispatching tool call '{}'", name);
        tool.execute(arguments, context).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &dyn McpTool> {
        self.order.iter().filter_map(|name| self.get_tool(name))
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The JSON map of arguments from the MCP request
    ///
    /// # Returns
    ///
    /// * `Result<T, ToolError>` - The parsed arguments or `InvalidArguments`
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: Map<String, Value>,
    ) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))
    }
}

/// Register all note-related tools with the registry
pub fn register_note_tools(registry: &mut ToolRegistry) {
    use crate::mcp::tools::notes;
    notes::register_note_tools(registry);
}
