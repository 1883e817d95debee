//! Tool-level errors and their mapping onto MCP error objects

use crate::error::QuickNoteError;
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// JSON-RPC code for a failed tool call
pub const INTERNAL_ERROR_CODE: i64 = -32603;
/// JSON-RPC code for an unknown top-level method
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;
/// JSON-RPC code for a body that is not JSON
pub const PARSE_ERROR_CODE: i64 = -32700;
/// JSON-RPC code for JSON that is not a request object
pub const INVALID_REQUEST_CODE: i64 = -32600;

/// Why a tool call did not produce an outcome
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The note store failed to persist a change
    #[error(transparent)]
    Storage(#[from] QuickNoteError),
}

/// Maps [`ToolError`]s onto MCP error objects for the stdio transport
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Log `error` and convert it.
    ///
    /// Caller mistakes become `invalid_params`; storage failures become
    /// `internal_error`.
    pub fn handle_error(error: ToolError, operation: &str) -> McpError {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            ToolError::UnknownTool(_) | ToolError::InvalidArguments(_) => {
                McpError::invalid_params(error.to_string(), None)
            }
            ToolError::Storage(_) => McpError::internal_error(error.to_string(), None),
        }
    }
}
