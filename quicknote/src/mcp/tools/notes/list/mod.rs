//! Note listing tool for MCP operations

use crate::mcp::error_handling::ToolError;
use crate::mcp::note_types::{ListNotesRequest, DEFAULT_LIST_LIMIT};
use crate::mcp::responses::ToolOutcome;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::widgets::WidgetTemplate;
use async_trait::async_trait;

/// Tool for listing and searching notes
#[derive(Default)]
pub struct ListNotesTool;

impl ListNotesTool {
    /// Creates a new instance of the ListNotesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListNotesTool {
    fn name(&self) -> &'static str {
        "list_notes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query to filter notes by content or tags"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "default": DEFAULT_LIST_LIMIT,
                    "description": "Maximum number of notes to return (default: 10)"
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
        let request: ListNotesRequest = BaseToolImpl::parse_arguments(arguments)?;
        context.tool_handlers.handle_list_notes(request).await
    }
}
