//! Repository interface over the persisted note collection

use super::{
    FileKeyValueStore, KeyValueNoteBackend, MemoryNoteBackend, Note, NoteId, SqliteNoteBackend,
};
use crate::config::{StorageBackendKind, StorageConfig};
use crate::error::{QuickNoteError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Last instant at which a write may still take effect.
///
/// Backends call [`WriteDeadline::check`] immediately before committing a
/// mutation. Past the deadline the write is abandoned untouched and reported
/// as a timeout; once committed it is reported as done, however long it took.
#[derive(Debug, Clone, Copy)]
pub struct WriteDeadline {
    operation: &'static str,
    timeout: Duration,
    expires_at: Option<Instant>,
}

impl WriteDeadline {
    /// Expire `timeout` from now
    pub fn after(operation: &'static str, timeout: Duration) -> Self {
        Self {
            operation,
            timeout,
            expires_at: Instant::now().checked_add(timeout),
        }
    }

    /// Never expire
    pub fn unbounded(operation: &'static str) -> Self {
        Self {
            operation,
            timeout: Duration::MAX,
            expires_at: None,
        }
    }

    /// `BackendTimeout` once the deadline has passed
    pub fn check(&self) -> Result<()> {
        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(QuickNoteError::BackendTimeout {
                operation: self.operation,
                timeout: self.timeout,
            }),
            _ => Ok(()),
        }
    }
}

/// Persistence for the single newest-first note collection.
///
/// Each mutation is atomic with respect to every other call on the same
/// backend instance: two concurrent `prepend`s both land, and a `remove`
/// never resurrects or drops an unrelated note.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// Short name for logs and health output
    fn name(&self) -> &'static str;

    /// Full collection, newest first. Empty when nothing has been saved.
    async fn load(&self) -> Result<Vec<Note>>;

    /// Insert `note` at the front of the collection unless `deadline` has
    /// passed by the time the insert would commit
    async fn prepend(&self, note: Note, deadline: WriteDeadline) -> Result<()>;

    /// Remove every note with this id, returning whether any was removed.
    ///
    /// Checks `deadline` before committing, like [`NoteBackend::prepend`].
    async fn remove(&self, id: &NoteId, deadline: WriteDeadline) -> Result<bool>;
}

/// Open the backend selected by `config`, creating its data directory if
/// needed.
pub fn open_backend(config: &StorageConfig) -> Result<Arc<dyn NoteBackend>> {
    let backend: Arc<dyn NoteBackend> = match config.backend {
        StorageBackendKind::Memory => Arc::new(MemoryNoteBackend::new()),
        StorageBackendKind::File => {
            let store = FileKeyValueStore::new(&config.data_dir)?;
            Arc::new(KeyValueNoteBackend::new(store))
        }
        StorageBackendKind::Sqlite => {
            std::fs::create_dir_all(&config.data_dir)?;
            Arc::new(SqliteNoteBackend::open(config.sqlite_path())?)
        }
    };
    tracing::debug!(
        "Opened {} note backend at {}",
        backend.name(),
        config.data_dir.display()
    );
    Ok(backend)
}
