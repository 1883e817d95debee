//! Model Context Protocol (MCP) server support
//!
//! This module exposes the note tools over two transports: rmcp on stdio
//! ([`NoteServer`]) and a raw JSON-RPC envelope for HTTP ([`JsonRpcHandler`]).
//! Both share one tool registry and one result shape.

// Module declarations
pub mod error_handling;
pub mod jsonrpc;
pub mod note_types;
pub mod responses;
pub mod server;
pub mod tool_handlers;
pub mod tool_registry;
pub mod tools;
pub mod widgets;

// Re-export commonly used items from submodules
pub use error_handling::{McpErrorHandler, ToolError};
pub use jsonrpc::{JsonRpcHandler, JsonRpcReply, JsonRpcRequest};
pub use responses::{render_tool_result, ToolOutcome};
pub use server::NoteServer;
pub use tool_handlers::ToolHandlers;
pub use tool_registry::{register_note_tools, McpTool, ToolContext, ToolRegistry};
pub use widgets::{Presentation, WidgetCatalog, WidgetTemplate};
