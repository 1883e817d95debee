//! Raw JSON-RPC envelope handling for the HTTP transport
//!
//! Requests look like `{jsonrpc?, method, params?, id?}`. Tool calls go through
//! [`NoteServer::call_tool_json`], the same path the stdio transport uses.

use super::error_handling::{
    ToolError, INTERNAL_ERROR_CODE, INVALID_REQUEST_CODE, METHOD_NOT_FOUND_CODE, PARSE_ERROR_CODE,
};
use super::server::{NoteServer, SERVER_NAME};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Protocol version reported when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

const NOTIFICATION_PREFIX: &str = "notifications/";

/// A decoded request envelope
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol marker, not checked
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Option<Value>,
    /// Request id echoed in the response
    #[serde(default)]
    pub id: Option<Value>,
}

/// What the transport should send back
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcReply {
    /// A response envelope, success or error
    Response(Value),
    /// The body was not a usable request; carries the error envelope
    Rejected(Value),
    /// A notification was accepted; nothing to send
    Accepted,
}

impl JsonRpcReply {
    /// The envelope to send, if any
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Response(body) | Self::Rejected(body) => Some(body),
            Self::Accepted => None,
        }
    }
}

/// Error envelope with a null id
pub fn error_envelope(code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": Value::Null,
        "error": { "code": code, "message": message.into() }
    })
}

fn success_envelope(id: Option<Value>, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id.unwrap_or(Value::Null),
        "result": result
    })
}

/// Why a method did not produce a result
enum MethodError {
    NotFound(String),
    Tool(ToolError),
}

impl From<ToolError> for MethodError {
    fn from(error: ToolError) -> Self {
        Self::Tool(error)
    }
}

/// Dispatches JSON-RPC envelopes onto a [`NoteServer`]
#[derive(Clone)]
pub struct JsonRpcHandler {
    server: NoteServer,
}

impl JsonRpcHandler {
    /// Handler for `server`
    pub fn new(server: NoteServer) -> Self {
        Self { server }
    }

    /// The server requests are dispatched onto
    pub fn server(&self) -> &NoteServer {
        &self.server
    }

    /// Handle a raw request body
    pub async fn handle_bytes(&self, body: &[u8]) -> JsonRpcReply {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                tracing::warn!("Rejecting JSON-RPC body that is not JSON: {}", e);
                JsonRpcReply::Rejected(error_envelope(PARSE_ERROR_CODE, "Parse error"))
            }
        }
    }

    /// Handle an already-parsed request
    pub async fn handle_value(&self, value: Value) -> JsonRpcReply {
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejecting malformed JSON-RPC request: {}", e);
                return JsonRpcReply::Rejected(error_envelope(
                    INVALID_REQUEST_CODE,
                    "Invalid Request",
                ));
            }
        };
        self.handle_request(request).await
    }

    /// Handle a decoded request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcReply {
        tracing::debug!("JSON-RPC request: {}", request.method);

        if request.method.starts_with(NOTIFICATION_PREFIX) {
            tracing::debug!("Accepted notification {}", request.method);
            return JsonRpcReply::Accepted;
        }

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcReply::Response(success_envelope(request.id, result)),
            Err(MethodError::NotFound(method)) => {
                tracing::warn!("Unknown JSON-RPC method: {}", method);
                JsonRpcReply::Response(error_envelope(
                    METHOD_NOT_FOUND_CODE,
                    format!("Unknown method: {method}"),
                ))
            }
            Err(MethodError::Tool(error)) => {
                tracing::error!("JSON-RPC {} failed: {}", request.method, error);
                JsonRpcReply::Response(error_envelope(INTERNAL_ERROR_CODE, error.to_string()))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, MethodError> {
        let params = params.unwrap_or(Value::Null);
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "tools/list" => Ok(json!({ "tools": self.server.tool_descriptors() })),
            "tools/call" => {
                let (name, arguments) = tool_call_params(params)?;
                Ok(self.server.call_tool_json(&name, arguments).await?)
            }
            "resources/list" => Ok(json!({ "resources": self.server.widgets().resources() })),
            "ping" => Ok(json!({})),
            other => Err(MethodError::NotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {}, "resources": {} },
            "serverInfo": { "name": SERVER_NAME, "version": crate::VERSION }
        })
    }
}

/// Pull `name` and `arguments` out of `tools/call` params.
///
/// Absent or null arguments mean `{}`.
fn tool_call_params(params: Value) -> Result<(String, Map<String, Value>), ToolError> {
    let Value::Object(mut params) = params else {
        return Err(ToolError::InvalidArguments(
            "tools/call params must be an object".to_string(),
        ));
    };

    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => {
            return Err(ToolError::InvalidArguments(
                "tools/call requires a tool name".to_string(),
            ))
        }
    };

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments,
        Some(_) => {
            return Err(ToolError::InvalidArguments(
                "arguments must be an object".to_string(),
            ))
        }
    };

    Ok((name, arguments))
}
