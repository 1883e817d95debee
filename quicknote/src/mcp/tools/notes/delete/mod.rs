//! Note deletion tool for MCP operations

use crate::mcp::error_handling::ToolError;
use crate::mcp::note_types::DeleteNoteRequest;
use crate::mcp::responses::ToolOutcome;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;

/// Tool for deleting notes
#[derive(Default)]
pub struct DeleteNoteTool;

impl DeleteNoteTool {
    /// Creates a new instance of the DeleteNoteTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteNoteTool {
    fn name(&self) -> &'static str {
        "delete_note"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "The ID of the note to delete"
                }
            },
            "required": ["id"],
            "additionalProperties": false
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<ToolOutcome, ToolError> {
        let request: DeleteNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        context.tool_handlers.handle_delete_note(request).await
    }
}
