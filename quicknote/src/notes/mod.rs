//! Notes and the note store
//!
//! A [`Note`] is a piece of free-form text (often a code snippet) with an
//! ordered list of tags. All notes live in a single newest-first collection
//! owned by a [`NoteStore`], which delegates persistence to a
//! [`NoteBackend`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use quicknote::notes::{MemoryNoteBackend, NoteStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> quicknote::Result<()> {
//! let store = NoteStore::new(Arc::new(MemoryNoteBackend::new()));
//!
//! let note = store
//!     .save_note("const x = 1", vec!["javascript".to_string()])
//!     .await?;
//!
//! let hits = store.search_notes("JavaScript").await;
//! assert_eq!(hits[0].id, note.id);
//! # Ok(())
//! # }
//! ```

use crate::common::ulid_generator::generate_monotonic_ulid_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod key_value;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use backend::{open_backend, NoteBackend, WriteDeadline};
pub use key_value::{FileKeyValueStore, KeyValueNoteBackend, KeyValueStore, NOTES_KEY};
pub use memory::{MemoryBackendConfig, MemoryNoteBackend};
pub use sqlite::SqliteNoteBackend;
pub use store::NoteStore;

/// Opaque note identifier.
///
/// Freshly minted ids are monotonic ULIDs, but any string is accepted when
/// looking a note up; an id that matches nothing is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(String);

impl NoteId {
    /// Mint a new id
    pub fn new() -> Self {
        Self(generate_monotonic_ulid_string())
    }

    /// Wrap an existing id string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

/// A saved note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Free-form text, possibly multi-line code
    pub content: String,
    /// Labels in insertion order; duplicates are kept
    pub tags: Vec<String>,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; notes are never edited
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time and a fresh id
    pub fn new(content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            content: content.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match against content or any tag.
    ///
    /// `needle` must already be lowercased. The empty needle matches.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle) || self.has_tag_matching(needle)
    }

    /// Case-insensitive substring match against tags only.
    ///
    /// `needle` must already be lowercased.
    pub fn has_tag_matching(&self, needle: &str) -> bool {
        self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_ids_are_unique() {
        let a = NoteId::new();
        let b = NoteId::new();
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn test_arbitrary_id_strings_are_accepted() {
        let id = NoteId::from("nonexistent");
        assert_eq!(id.as_str(), "nonexistent");
        assert_eq!(id.to_string(), "nonexistent");
    }

    #[test]
    fn test_new_note_timestamps_match() {
        let note = Note::new("hello", vec![]);
        assert_eq!(note.created_at, note.updated_at);
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note::new("body", vec!["a".into(), "a".into()]);
        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["id"], json!(note.id.as_str()));
        assert_eq!(value["tags"], json!(["a", "a"]));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());

        let back: Note = serde_json::from_value(value).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn test_query_matching_is_case_insensitive() {
        let note = Note::new("Const X = 1", vec!["JavaScript".into()]);

        assert!(note.matches_query("const x"));
        assert!(note.matches_query("script"));
        assert!(note.matches_query(""));
        assert!(!note.matches_query("python"));

        assert!(note.has_tag_matching("java"));
        assert!(!note.has_tag_matching("const"));
    }
}
