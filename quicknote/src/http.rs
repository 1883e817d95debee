//! HTTP transport for the JSON-RPC envelope
//!
//! A single endpoint, `/mcp`:
//! - `GET` returns a health/info document
//! - `POST` takes a JSON-RPC request
//! - `OPTIONS` answers CORS preflight
//!
//! Every response, including the 500 produced for a panicking handler,
//! carries permissive CORS headers.

use crate::error::Result;
use crate::mcp::jsonrpc::{JsonRpcHandler, JsonRpcReply};
use crate::mcp::server::{NoteServer, SERVER_NAME};
use crate::mcp::widgets::WidgetTemplate;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::any::Any;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Path of the MCP endpoint
pub const MCP_PATH: &str = "/mcp";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, Mcp-Session-Id";

/// Build the router for `server`
pub fn router(server: NoteServer) -> Router {
    let routes = Router::new()
        .route(MCP_PATH, get(info).post(rpc).options(preflight))
        .with_state(JsonRpcHandler::new(server));
    with_layers(routes)
}

/// Panic capture innermost, CORS headers outermost so they land on every response
fn with_layers(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

/// Serve `server` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, server: NoteServer, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Serving MCP over HTTP at http://{}{}", addr, MCP_PATH);

    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn info(State(handler): State<JsonRpcHandler>) -> Json<Value> {
    let server = handler.server();
    let widgets = server.widgets();
    Json(json!({
        "name": SERVER_NAME,
        "version": crate::VERSION,
        "status": "ok",
        "transport": "json-rpc",
        "tools": server.registry().list_tool_names(),
        "widgets": {
            "noteSaved": widgets.uri(WidgetTemplate::NoteSaved),
            "notesList": widgets.uri(WidgetTemplate::NotesList),
        },
        "storage": server.store().backend_name(),
    }))
}

async fn rpc(State(handler): State<JsonRpcHandler>, body: Bytes) -> Response {
    match handler.handle_bytes(&body).await {
        JsonRpcReply::Response(body) => Json(body).into_response(),
        JsonRpcReply::Rejected(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
        JsonRpcReply::Accepted => StatusCode::ACCEPTED.into_response(),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!("HTTP handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
