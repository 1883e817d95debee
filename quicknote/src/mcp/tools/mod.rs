//! MCP tools, one module per category

pub mod notes;
