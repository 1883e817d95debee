//! Note tools for MCP operations
//!
//! Each tool lives in its own submodule with its schema and a
//! `description.md` holding the text advertised to clients.
//!
//! ## Tools
//!
//! - **save**: store a note or code snippet with optional tags
//! - **list**: list notes, optionally filtered by a content/tag query
//! - **recent**: the newest notes first
//! - **delete**: remove a note by id
//!
//! Request types live in `crate::mcp::note_types`; the business logic is in
//! `crate::mcp::tool_handlers`.

pub mod delete;
pub mod list;
pub mod recent;
pub mod save;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all note tools with the registry, in listing order
pub fn register_note_tools(registry: &mut ToolRegistry) {
    registry.register(save::SaveNoteTool::new());
    registry.register(list::ListNotesTool::new());
    registry.register(recent::GetRecentNotesTool::new());
    registry.register(delete::DeleteNoteTool::new());
}
