//! Typed arguments for the note tools
//!
//! Every request rejects unknown fields. Optional fields carry the defaults
//! advertised in each tool's schema.

use serde::{Deserialize, Serialize};

/// Default `limit` for `list_notes`
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Default `count` for `get_recent_notes`
pub const DEFAULT_RECENT_COUNT: usize = 5;

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

/// Arguments for `save_note`
///
/// ```ignore
/// SaveNoteRequest {
///     content: "const x = 1".to_string(),
///     tags: vec!["javascript".to_string()],
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SaveNoteRequest {
    /// Note body or code snippet
    pub content: String,
    /// Labels for the note
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Arguments for `list_notes`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListNotesRequest {
    /// Filter by content or tag; absent or empty lists everything
    #[serde(default)]
    pub query: Option<String>,
    /// Maximum number of notes returned
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

impl ListNotesRequest {
    /// The query, with the empty string treated as no query
    pub fn effective_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

/// Arguments for `get_recent_notes`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GetRecentNotesRequest {
    /// How many of the newest notes to return
    #[serde(default = "default_recent_count")]
    pub count: usize,
}

/// Arguments for `delete_note`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteNoteRequest {
    /// Id of the note to remove
    pub id: String,
}
