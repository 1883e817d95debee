//! Tool handlers for the note tools
//!
//! Each handler takes an already-validated request, calls the note store and
//! shapes a [`ToolOutcome`].

use super::error_handling::ToolError;
use super::note_types::{
    DeleteNoteRequest, GetRecentNotesRequest, ListNotesRequest, SaveNoteRequest,
};
use super::responses::ToolOutcome;
use super::widgets::{Presentation, WidgetTemplate};
use crate::notes::NoteStore;
use serde_json::json;
use std::sync::Arc;

/// Shared handler state for the note tools
#[derive(Debug, Clone)]
pub struct ToolHandlers {
    store: Arc<NoteStore>,
}

impl ToolHandlers {
    /// Create handlers over `store`
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// The note store backing these handlers
    pub fn store(&self) -> &Arc<NoteStore> {
        &self.store
    }

    /// Handle the `save_note` tool operation.
    pub async fn handle_save_note(
        &self,
        request: SaveNoteRequest,
    ) -> Result<ToolOutcome, ToolError> {
        tracing::debug!("Saving note with {} tag(s)", request.tags.len());

        let note = self.store.save_note(request.content, request.tags).await?;
        tracing::info!("Saved note {}", note.id);

        Ok(ToolOutcome::new(
            format!("Note saved successfully with ID: {}", note.id),
            json!({ "note": note, "success": true }),
        )
        .with_presentation(Presentation::new(
            WidgetTemplate::NoteSaved,
            "Saving note...",
            "Note saved",
        )))
    }

    /// Handle the `list_notes` tool operation.
    ///
    /// Searches when a non-empty query is given, otherwise lists everything,
    /// then keeps the first `limit` notes.
    pub async fn handle_list_notes(
        &self,
        request: ListNotesRequest,
    ) -> Result<ToolOutcome, ToolError> {
        let query = request.effective_query();
        tracing::debug!("Listing notes (query: {:?}, limit: {})", query, request.limit);

        let mut notes = match query {
            Some(query) => self.store.search_notes(query).await,
            None => self.store.get_all_notes().await,
        };
        notes.truncate(request.limit);

        let count = notes.len();
        let text = if count > 0 {
            format!("Found {count} note(s)")
        } else {
            "No notes found".to_string()
        };

        Ok(ToolOutcome::new(
            text,
            json!({ "notes": notes, "count": count, "query": query }),
        )
        .with_presentation(Presentation::new(
            WidgetTemplate::NotesList,
            "Loading notes...",
            format!("{count} notes loaded"),
        )))
    }

    /// Handle the `get_recent_notes` tool operation.
    pub async fn handle_get_recent_notes(
        &self,
        request: GetRecentNotesRequest,
    ) -> Result<ToolOutcome, ToolError> {
        tracing::debug!("Getting {} recent notes", request.count);

        let notes = self.store.get_recent_notes(request.count).await;
        let count = notes.len();
        let text = if count > 0 {
            format!("Retrieved {count} recent note(s)")
        } else {
            "No notes saved yet".to_string()
        };

        Ok(
            ToolOutcome::new(text, json!({ "notes": notes, "count": count })).with_presentation(
                Presentation::new(
                    WidgetTemplate::NotesList,
                    "Loading recent notes...",
                    format!("{count} notes loaded"),
                ),
            ),
        )
    }

    /// Handle the `delete_note` tool operation.
    ///
    /// An unknown id is a normal outcome with `deleted: false`.
    pub async fn handle_delete_note(
        &self,
        request: DeleteNoteRequest,
    ) -> Result<ToolOutcome, ToolError> {
        tracing::debug!("Deleting note {}", request.id);

        let deleted = self.store.delete_note(&request.id).await?;
        let text = if deleted {
            tracing::info!("Deleted note {}", request.id);
            format!("Note {} deleted successfully", request.id)
        } else {
            format!("Note {} not found", request.id)
        };

        Ok(ToolOutcome::new(
            text,
            json!({ "deleted": deleted, "noteId": request.id }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{MemoryBackendConfig, MemoryNoteBackend};
    use serde_json::Value;

    fn create_handlers() -> (ToolHandlers, MemoryNoteBackend) {
        let backend = MemoryNoteBackend::new();
        let store = NoteStore::new(Arc::new(backend.clone()));
        (ToolHandlers::new(Arc::new(store)), backend)
    }

    fn list(query: Option<&str>, limit: usize) -> ListNotesRequest {
        ListNotesRequest {
            query: query.map(str::to_string),
            limit,
        }
    }

    #[tokio::test]
    async fn test_save_note_outcome() {
        let (handlers, _) = create_handlers();
        let outcome = handlers
            .handle_save_note(SaveNoteRequest {
                content: "const x = 1".into(),
                tags: vec!["javascript".into()],
            })
            .await
            .unwrap();

        let id = outcome.structured["note"]["id"].as_str().unwrap().to_string();
        assert_eq!(outcome.text, format!("Note saved successfully with ID: {id}"));
        assert_eq!(outcome.structured["success"], true);
        assert_eq!(outcome.structured["note"]["tags"], json!(["javascript"]));

        let presentation = outcome.presentation.unwrap();
        assert_eq!(presentation.template, WidgetTemplate::NoteSaved);
        assert_eq!(presentation.invoking, "Saving note...");
        assert_eq!(presentation.invoked, "Note saved");
    }

    #[tokio::test]
    async fn test_list_notes_limit_and_query() {
        let (handlers, _) = create_handlers();
        for i in 0..12 {
            handlers
                .store()
                .save_note(format!("snippet {i}"), vec!["code".into()])
                .await
                .unwrap();
        }

        let outcome = handlers.handle_list_notes(list(None, 10)).await.unwrap();
        assert_eq!(outcome.structured["count"], 10);
        assert_eq!(outcome.structured["query"], Value::Null);
        assert_eq!(outcome.text, "Found 10 note(s)");
        assert_eq!(outcome.presentation.unwrap().invoked, "10 notes loaded");

        let outcome = handlers
            .handle_list_notes(list(Some("snippet 1"), 10))
            .await
            .unwrap();
        // "snippet 1", "snippet 10", "snippet 11"
        assert_eq!(outcome.structured["count"], 3);
        assert_eq!(outcome.structured["query"], "snippet 1");

        let outcome = handlers.handle_list_notes(list(Some(""), 2)).await.unwrap();
        assert_eq!(outcome.structured["count"], 2);
        assert_eq!(outcome.structured["query"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_notes_empty() {
        let (handlers, _) = create_handlers();
        let outcome = handlers
            .handle_list_notes(list(Some("nothing"), 10))
            .await
            .unwrap();
        assert_eq!(outcome.text, "No notes found");
        assert_eq!(outcome.structured["notes"], json!([]));
        assert_eq!(outcome.presentation.unwrap().invoked, "0 notes loaded");
    }

    #[tokio::test]
    async fn test_recent_notes_on_empty_store() {
        let (handlers, _) = create_handlers();
        let outcome = handlers
            .handle_get_recent_notes(GetRecentNotesRequest { count: 5 })
            .await
            .unwrap();

        assert_eq!(outcome.text, "No notes saved yet");
        assert_eq!(outcome.structured, json!({"notes": [], "count": 0}));
        let presentation = outcome.presentation.unwrap();
        assert_eq!(presentation.template, WidgetTemplate::NotesList);
        assert_eq!(presentation.invoking, "Loading recent notes...");
    }

    #[tokio::test]
    async fn test_delete_note_outcomes() {
        let (handlers, _) = create_handlers();
        let note = handlers.store().save_note("x", vec![]).await.unwrap();

        let outcome = handlers
            .handle_delete_note(DeleteNoteRequest {
                id: note.id.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome.text, format!("Note {} deleted successfully", note.id));
        assert_eq!(outcome.structured["deleted"], true);
        assert!(outcome.presentation.is_none());

        let outcome = handlers
            .handle_delete_note(DeleteNoteRequest {
                id: "nonexistent".into(),
            })
            .await
            .unwrap();
        assert_eq!(outcome.text, "Note nonexistent not found");
        assert_eq!(
            outcome.structured,
            json!({"deleted": false, "noteId": "nonexistent"})
        );
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_tool_error() {
        let (handlers, backend) = create_handlers();
        backend
            .set_config(MemoryBackendConfig {
                fail_writes: true,
                ..Default::default()
            })
            .await;

        let err = handlers
            .handle_save_note(SaveNoteRequest {
                content: "x".into(),
                tags: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Storage(_)));
    }
}
