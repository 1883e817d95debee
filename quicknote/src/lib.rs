//! # QuickNote
//!
//! A note and code-snippet store exposed as Model Context Protocol tools.
//!
//! ## Features
//!
//! - **Note Store**: Newest-first notes with tags, search and recency queries
//! - **Storage Backends**: In-memory, JSON file key-value, and SQLite
//! - **MCP Tools**: `save_note`, `list_notes`, `get_recent_notes`, `delete_note`
//! - **Transports**: rmcp over stdio, and raw JSON-RPC over HTTP
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quicknote::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> quicknote::Result<()> {
//! let store = Arc::new(NoteStore::new(Arc::new(MemoryNoteBackend::new())));
//! let server = NoteServer::new(store, "http://localhost:3000");
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! quicknote::http::serve(listener, server, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared utilities
pub mod common;

/// Configuration loading
pub mod config;

/// Error types used throughout the library
pub mod error;

/// HTTP transport
pub mod http;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Notes, storage backends, and the note store
pub mod notes;

// Re-export core types
pub use config::{Config, ConfigError, StorageBackendKind, StorageConfig};
pub use error::{QuickNoteError, Result};
pub use mcp::{JsonRpcHandler, NoteServer};
pub use notes::{Note, NoteBackend, NoteId, NoteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Config, Note, NoteBackend, NoteId, NoteStore, QuickNoteError, Result, StorageBackendKind,
    };

    pub use crate::mcp::{JsonRpcHandler, NoteServer, ToolError, ToolOutcome};
    pub use crate::notes::{
        FileKeyValueStore, KeyValueNoteBackend, MemoryNoteBackend, SqliteNoteBackend,
    };
}
