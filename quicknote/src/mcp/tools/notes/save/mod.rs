//! Note save tool for MCP operations

use crate::mcp::error_handling::ToolError;
use crate::mcp::note_types::SaveNoteRequest;
use crate::mcp::responses::ToolOutcome;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::widgets::WidgetTemplate;
use async_trait::async_trait;

/// Tool for saving new notes
#[derive(Default)]
pub struct SaveNoteTool;

impl SaveNoteTool {
    /// Creates a new instance of the SaveNoteTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SaveNoteTool {
    fn name(&self) -> &'static str {
        "save_note"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The note content or code snippet to save"
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Tags to categorize the note (e.g., javascript, todo, idea)"
                }
            },
            "required": ["content"],
            "additionalProperties": false
        })
    }

    fn output_template(&self) -> Option<WidgetTemplate> {
        Some(WidgetTemplate::NoteSaved)
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<ToolOutcome, ToolError> {
        let request: SaveNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        context.tool_handlers.handle_save_note(request).await
    }
}
