//! SQLite note backend
//!
//! One row per note. An autoincrement `seq` column records insertion order,
//! so newest-first is `ORDER BY seq DESC`. Inserts and deletes are single
//! statements and therefore atomic without any application-level locking
//! beyond the connection mutex.

use super::{Note, NoteBackend, NoteId, WriteDeadline};
use crate::error::{QuickNoteError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT NOT NULL UNIQUE,
    content    TEXT NOT NULL,
    tags       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

type NoteRow = (String, String, String, String, String);

/// Relational note backend on a single SQLite connection
#[derive(Debug, Clone)]
pub struct SqliteNoteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteNoteBackend {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Private in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| QuickNoteError::storage("SQLite connection lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| QuickNoteError::storage(format!("SQLite task failed: {e}")))?
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| QuickNoteError::storage(format!("Bad timestamp {raw:?}: {e}")))
}

fn note_from_row((id, content, tags, created_at, updated_at): NoteRow) -> Result<Note> {
    Ok(Note {
        id: NoteId::from_string(id),
        content,
        tags: serde_json::from_str(&tags)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl NoteBackend for SqliteNoteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn load(&self) -> Result<Vec<Note>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, tags, created_at, updated_at FROM notes ORDER BY seq DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
                })?
                .collect::<rusqlite::Result<Vec<NoteRow>>>()?;
            rows.into_iter().map(note_from_row).collect()
        })
        .await
    }

    async fn prepend(&self, note: Note, deadline: WriteDeadline) -> Result<()> {
        let tags = serde_json::to_string(&note.tags)?;
        self.with_connection(move |conn| {
            deadline.check()?;
            conn.execute(
                "INSERT INTO notes (id, content, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    note.id.as_str(),
                    note.content,
                    tags,
                    format_timestamp(&note.created_at),
                    format_timestamp(&note.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &NoteId, deadline: WriteDeadline) -> Result<bool> {
        let id = id.as_str().to_string();
        self.with_connection(move |conn| {
            deadline.check()?;
            let removed = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn no_deadline() -> WriteDeadline {
        WriteDeadline::unbounded("test")
    }

    #[tokio::test]
    async fn test_round_trip_preserves_note_exactly() {
        let backend = SqliteNoteBackend::open_in_memory().unwrap();
        let note = Note::new("line one\nline two", vec!["b".into(), "a".into(), "b".into()]);

        backend.prepend(note.clone(), no_deadline()).await.unwrap();
        assert_eq!(backend.load().await.unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let backend = SqliteNoteBackend::open_in_memory().unwrap();
        let older = Note::new("older", vec![]);
        let newer = Note::new("newer", vec![]);

        backend.prepend(older.clone(), no_deadline()).await.unwrap();
        backend.prepend(newer.clone(), no_deadline()).await.unwrap();

        let ids: Vec<_> = backend.load().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_remove() {
        let backend = SqliteNoteBackend::open_in_memory().unwrap();
        let keep = Note::new("keep", vec![]);
        let gone = Note::new("gone", vec![]);
        backend.prepend(keep.clone(), no_deadline()).await.unwrap();
        backend.prepend(gone.clone(), no_deadline()).await.unwrap();

        assert!(backend.remove(&gone.id, no_deadline()).await.unwrap());
        assert!(!backend.remove(&gone.id, no_deadline()).await.unwrap());
        assert_eq!(backend.load().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let backend = SqliteNoteBackend::open_in_memory().unwrap();
        let note = Note::new("once", vec![]);
        backend.prepend(note.clone(), no_deadline()).await.unwrap();

        assert!(matches!(
            backend.prepend(note, no_deadline()).await,
            Err(QuickNoteError::Sqlite(_))
        ));
    }

    #[tokio::test]
    async fn test_database_file_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.db");
        let note = Note::new("durable", vec!["db".into()]);

        SqliteNoteBackend::open(&path)
            .unwrap()
            .prepend(note.clone(), no_deadline())
            .await
            .unwrap();

        let reopened = SqliteNoteBackend::open(&path).unwrap();
        assert_eq!(reopened.load().await.unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn test_expired_deadline_skips_the_statement() {
        let backend = SqliteNoteBackend::open_in_memory().unwrap();
        let kept = Note::new("kept", vec![]);
        backend.prepend(kept.clone(), no_deadline()).await.unwrap();

        let expired = WriteDeadline::after("save_note", Duration::ZERO);
        assert!(matches!(
            backend.prepend(Note::new("late", vec![]), expired).await,
            Err(QuickNoteError::BackendTimeout { .. })
        ));
        assert!(backend.remove(&kept.id, expired).await.is_err());
        assert_eq!(backend.load().await.unwrap(), vec![kept]);
    }
}
