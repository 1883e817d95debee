//! Integration layer for calling MCP tools from CLI commands
//!
//! Note commands run the same registered tools the server exposes, so the
//! CLI and MCP clients always see identical behavior.

use quicknote::mcp::{NoteServer, ToolError};
use quicknote::{Config, NoteStore};
use serde_json::{Map, Value};
use std::sync::Arc;

/// CLI-specific tool context that executes MCP tools in-process
pub struct CliToolContext {
    server: NoteServer,
}

impl CliToolContext {
    /// Open the configured store and register the note tools
    pub fn new(config: &Config) -> quicknote::Result<Self> {
        Ok(Self {
            server: NoteServer::from_config(config)?,
        })
    }

    /// Context over an existing store
    pub fn with_store(store: Arc<NoteStore>, base_url: &str) -> Self {
        Self {
            server: NoteServer::new(store, base_url),
        }
    }

    /// The note store behind the tools
    pub fn store(&self) -> &Arc<NoteStore> {
        self.server.store()
    }

    /// Execute an MCP tool, returning its wire-form result
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, ToolError> {
        tracing::debug!("Executing tool '{}' from CLI", tool_name);
        self.server.call_tool_json(tool_name, arguments).await
    }

    /// Helper to convert CLI arguments to MCP tool arguments.
    ///
    /// `None` values are left out so the tool's defaults apply.
    pub fn create_arguments(&self, pairs: Vec<(&str, Option<Value>)>) -> Map<String, Value> {
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Get the list of available tools
    pub fn list_tools(&self) -> Vec<String> {
        self.server.registry().list_tool_names()
    }
}

/// Utilities for formatting MCP responses for CLI display
pub mod response_formatting {
    use colored::*;
    use serde_json::Value;

    /// The summary line of a tool result
    pub fn summary_text(result: &Value) -> &str {
        result["content"][0]["text"].as_str().unwrap_or("")
    }

    /// Green summary line
    pub fn format_success_response(result: &Value) -> String {
        let text = summary_text(result);
        if text.is_empty() {
            "Operation completed successfully".green().to_string()
        } else {
            text.green().to_string()
        }
    }

    /// Yellow summary line, for results that found nothing to act on
    pub fn format_warning_response(result: &Value) -> String {
        summary_text(result).yellow().to_string()
    }

    /// One block per note: id and tags on the first line, then the content
    pub fn format_notes(notes: &[Value]) -> String {
        notes
            .iter()
            .map(format_note)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_note(note: &Value) -> String {
        let id = note["id"].as_str().unwrap_or_default();
        let created = note["createdAt"].as_str().unwrap_or_default();
        let tags = note["tags"]
            .as_array()
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(|tag| format!("#{tag}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let mut header = format!("{} {}", id.bold(), created.dimmed());
        if !tags.is_empty() {
            header.push(' ');
            header.push_str(&tags.cyan().to_string());
        }

        let content = note["content"]
            .as_str()
            .unwrap_or_default()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{header}\n{content}")
    }

    /// Pretty-printed structured payload
    pub fn format_structured(result: &Value) -> String {
        serde_json::to_string_pretty(&result["structuredContent"]).unwrap_or_default()
    }
}
