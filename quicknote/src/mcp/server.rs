//! MCP server implementation for the note tools

use crate::config::Config;
use crate::error::{QuickNoteError, Result};
use crate::notes::NoteStore;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::future::Future;
use std::sync::Arc;

use super::error_handling::{McpErrorHandler, ToolError};
use super::responses::render_tool_result;
use super::tool_handlers::ToolHandlers;
use super::tool_registry::{register_note_tools, ToolContext, ToolRegistry};
use super::widgets::WidgetCatalog;

/// Name reported to clients during the handshake
pub const SERVER_NAME: &str = "quick-note";

const INSTRUCTIONS: &str = "A quick note-taking server for text and code snippets. \
Use save_note to store a note with optional tags, list_notes to browse or search by \
content and tags, get_recent_notes for the newest notes and delete_note to remove a \
note by its ID.";

/// MCP server for the note tools
///
/// Cheap to clone; clones share the registry and the store.
#[derive(Clone)]
pub struct NoteServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl NoteServer {
    /// Create a server over `store` whose widgets resolve against `base_url`.
    pub fn new(store: Arc<NoteStore>, base_url: impl Into<String>) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_note_tools(&mut tool_registry);

        let tool_handlers = Arc::new(ToolHandlers::new(store));
        let widgets = Arc::new(WidgetCatalog::new(base_url));

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(tool_handlers, widgets)),
        }
    }

    /// Open the configured backend and build a server on it
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = NoteStore::from_config(config)?;
        Ok(Self::new(Arc::new(store), config.base_url.clone()))
    }

    /// The tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// The note store behind the tools
    pub fn store(&self) -> &Arc<NoteStore> {
        self.tool_context.tool_handlers.store()
    }

    /// Widget catalog for this server's base URL
    pub fn widgets(&self) -> &WidgetCatalog {
        &self.tool_context.widgets
    }

    /// Tool descriptors in declaration order
    pub fn tool_descriptors(&self) -> Vec<Value> {
        self.tool_registry.descriptors(&self.tool_context.widgets)
    }

    /// Run a tool and render its result in wire form.
    ///
    /// Both transports call tools through here.
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> std::result::Result<Value, ToolError> {
        let outcome = self
            .tool_registry
            .dispatch(name, arguments, &self.tool_context)
            .await?;
        Ok(render_tool_result(&outcome, &self.tool_context.widgets))
    }

    /// Serve over stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> Result<()> {
        tracing::info!("Starting MCP server on stdio");
        let running = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| QuickNoteError::Other(format!("Failed to start MCP server: {e}")))?;
        running
            .waiting()
            .await
            .map_err(|e| QuickNoteError::Other(format!("MCP server task failed: {e}")))?;
        tracing::info!("MCP client disconnected");
        Ok(())
    }
}

/// Convert a wire-shaped value into an rmcp model type
fn from_wire<T: DeserializeOwned>(value: Value, what: &str) -> std::result::Result<T, McpError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Failed to convert {} into MCP model: {}", what, e);
        McpError::internal_error(format!("Failed to build {what}: {e}"), None)
    })
}

impl ServerHandler for NoteServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListToolsResult, McpError>> + Send + '_ {
        async move { from_wire(json!({ "tools": self.tool_descriptors() }), "tool list") }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let result = self
                .call_tool_json(&request.name, request.arguments.unwrap_or_default())
                .await
                .map_err(|e| McpErrorHandler::handle_error(e, &request.name))?;
            from_wire(result, "tool result")
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            from_wire(
                json!({ "resources": self.tool_context.widgets.resources() }),
                "resource list",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::MemoryNoteBackend;

    fn create_server() -> NoteServer {
        let store = NoteStore::new(Arc::new(MemoryNoteBackend::new()));
        NoteServer::new(Arc::new(store), "http://localhost:3000")
    }

    #[test]
    fn test_server_info() {
        let info = create_server().get_info();
        assert_eq!(info.server_info.name, "quick-note");
        assert_eq!(info.server_info.version, crate::VERSION);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.unwrap().contains("save_note"));
    }

    #[test]
    fn test_descriptors_convert_to_rmcp_tools() {
        let server = create_server();
        let result: ListToolsResult =
            from_wire(json!({ "tools": server.tool_descriptors() }), "tool list").unwrap();

        let names: Vec<&str> = result.tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec!["save_note", "list_notes", "get_recent_notes", "delete_note"]
        );
        assert_eq!(
            result.tools[0].input_schema.get("required"),
            Some(&json!(["content"]))
        );
    }

    #[test]
    fn test_rmcp_tool_list_keeps_descriptor_meta() {
        let server = create_server();
        let descriptors = server.tool_descriptors();
        let result: ListToolsResult =
            from_wire(json!({ "tools": descriptors.clone() }), "tool list").unwrap();

        let on_the_wire = serde_json::to_value(&result).unwrap();
        assert_eq!(on_the_wire, json!({ "tools": descriptors }));
        assert_eq!(
            on_the_wire["tools"][0]["_meta"]["openai/outputTemplate"],
            "http://localhost:3000/widget/note-saved"
        );
        assert!(result.tools[3].meta.is_none());
    }

    #[tokio::test]
    async fn test_tool_results_convert_to_rmcp() {
        let server = create_server();
        let mut args = Map::new();
        args.insert("content".into(), json!("hello"));
        let value = server.call_tool_json("save_note", args).await.unwrap();

        let result: CallToolResult = from_wire(value.clone(), "tool result").unwrap();
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.structured_content, Some(value["structuredContent"].clone()));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = create_server()
            .call_tool_json("nope", Map::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[test]
    fn test_resources_convert_to_rmcp() {
        let server = create_server();
        let result: ListResourcesResult = from_wire(
            json!({ "resources": server.widgets().resources() }),
            "resource list",
        )
        .unwrap();
        assert_eq!(result.resources.len(), 2);
        assert_eq!(
            result.resources[0].raw.uri,
            "http://localhost:3000/widget/notes-list"
        );
    }
}
