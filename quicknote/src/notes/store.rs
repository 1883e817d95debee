//! The note store
//!
//! [`NoteStore`] is the only owner of the note collection. Reads never fail
//! from the caller's point of view: a broken or slow backend yields an empty
//! collection and an error log line. Writes propagate their errors.
//!
//! Reads are abandoned when the backend timeout elapses. Writes are not:
//! they carry a [`WriteDeadline`] the backend checks just before committing,
//! and are always awaited, so a reported timeout means nothing was written.

use super::{open_backend, Note, NoteBackend, NoteId, WriteDeadline};
use crate::config::{Config, DEFAULT_BACKEND_TIMEOUT_MS};
use crate::error::{QuickNoteError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Note collection facade over a [`NoteBackend`]
#[derive(Clone)]
pub struct NoteStore {
    backend: Arc<dyn NoteBackend>,
    timeout: Duration,
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NoteStore {
    /// Wrap a backend using the default backend timeout
    pub fn new(backend: Arc<dyn NoteBackend>) -> Self {
        Self {
            backend,
            timeout: Duration::from_millis(DEFAULT_BACKEND_TIMEOUT_MS),
        }
    }

    /// Override the per-call backend timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open the backend described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(open_backend(&config.storage)?).with_timeout(config.backend_timeout))
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    async fn bounded_read<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(QuickNoteError::BackendTimeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }

    fn write_deadline(&self, operation: &'static str) -> WriteDeadline {
        WriteDeadline::after(operation, self.timeout)
    }

    /// Every note, newest first. Empty if the backend read fails.
    pub async fn get_all_notes(&self) -> Vec<Note> {
        match self.bounded_read("load", self.backend.load()).await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::error!(
                    "Failed to read notes from {} backend: {}",
                    self.backend_name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Create a note and put it at the front of the collection
    pub async fn save_note(&self, content: impl Into<String>, tags: Vec<String>) -> Result<Note> {
        let note = Note::new(content, tags);
        self.backend
            .prepend(note.clone(), self.write_deadline("save_note"))
            .await?;
        tracing::debug!("Saved note {} with {} tag(s)", note.id, note.tags.len());
        Ok(note)
    }

    /// Remove the note with `id`; `Ok(false)` when there was none
    pub async fn delete_note(&self, id: &str) -> Result<bool> {
        let id = NoteId::from_string(id);
        let removed = self
            .backend
            .remove(&id, self.write_deadline("delete_note"))
            .await?;
        tracing::debug!("Delete of note {} removed={}", id, removed);
        Ok(removed)
    }

    /// Notes whose content or any tag contains `query`, ignoring case.
    ///
    /// The empty query matches every note.
    pub async fn search_notes(&self, query: &str) -> Vec<Note> {
        let needle = query.to_lowercase();
        self.get_all_notes()
            .await
            .into_iter()
            .filter(|note| note.matches_query(&needle))
            .collect()
    }

    /// The `count` most recently created notes, newest first
    pub async fn get_recent_notes(&self, count: usize) -> Vec<Note> {
        let mut notes = self.get_all_notes().await;
        notes.truncate(count);
        notes
    }

    /// Notes with a tag containing `tag`, ignoring case
    pub async fn get_notes_by_tag(&self, tag: &str) -> Vec<Note> {
        let needle = tag.to_lowercase();
        self.get_all_notes()
            .await
            .into_iter()
            .filter(|note| note.has_tag_matching(&needle))
            .collect()
    }

    /// Size of the collection
    pub async fn note_count(&self) -> usize {
        self.get_all_notes().await.len()
    }
}
