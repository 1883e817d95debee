//! Recent notes tool for MCP operations

use crate::mcp::error_handling::ToolError;
use crate::mcp::note_types::{GetRecentNotesRequest, DEFAULT_RECENT_COUNT};
use crate::mcp::responses::ToolOutcome;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::widgets::WidgetTemplate;
use async_trait::async_trait;

/// Tool for fetching the newest notes
#[derive(Default)]
pub struct GetRecentNotesTool;

impl GetRecentNotesTool {
    /// Creates a new instance of the GetRecentNotesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetRecentNotesTool {
    fn name(&self) -> &'static str {
        "get_recent_notes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "minimum": 0,
                    "default": DEFAULT_RECENT_COUNT,
                    "description": "Number of recent notes to retrieve (default: 5)"
                }
            },
            "additionalProperties": false
        })
    }

    fn output_template(&self) -> Option<WidgetTemplate> {
        Some(WidgetTemplate::NotesList)
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<ToolOutcome, ToolError> {
        let request: GetRecentNotesRequest = BaseToolImpl::parse_arguments(arguments)?;
        context.tool_handlers.handle_get_recent_notes(request).await
    }
}
