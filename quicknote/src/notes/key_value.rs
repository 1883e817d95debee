//! Key-value backed note storage
//!
//! The whole collection lives under one key, [`NOTES_KEY`], as a JSON array.
//! Every mutation is a read-modify-write of that array. Writers inside one
//! process are serialized through a mutex so none of them can overwrite
//! another's change; separate processes sharing a store are still
//! last-write-wins, but never see a torn document.

use super::{Note, NoteBackend, NoteId, WriteDeadline};
use crate::error::{QuickNoteError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Key holding the entire note collection
pub const NOTES_KEY: &str = "quick-notes";

/// Minimal get/set contract the key-value backend needs
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, or `None` if it was never set
    async fn get(&self, key: &str) -> Result<Option<Vec<Note>>>;

    /// Replace the value under `key`
    async fn set(&self, key: &str, notes: &[Note]) -> Result<()>;
}

/// One JSON document per key inside a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the documents
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(QuickNoteError::storage(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<Note>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, notes: &[Note]) -> Result<()> {
        let path = self.path_for(key)?;
        let root = self.root.clone();
        let prefix = format!(".{key}-");
        let body = serde_json::to_vec_pretty(notes)?;

        // Each write gets its own temp file, renamed over the document in one step
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".tmp")
                .tempfile_in(&root)?;
            tmp.write_all(&body)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| QuickNoteError::storage(format!("File write task failed: {e}")))?
    }
}

/// Note backend over any [`KeyValueStore`]
#[derive(Debug)]
pub struct KeyValueNoteBackend<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> KeyValueNoteBackend<S> {
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: KeyValueStore> NoteBackend for KeyValueNoteBackend<S> {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Vec<Note>> {
        Ok(self.store.get(NOTES_KEY).await?.unwrap_or_default())
    }

    async fn prepend(&self, note: Note, deadline: WriteDeadline) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load().await?;
        notes.insert(0, note);
        deadline.check()?;
        self.store.set(NOTES_KEY, &notes).await
    }

    async fn remove(&self, id: &NoteId, deadline: WriteDeadline) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load().await?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);

        if notes.len() == before {
            return Ok(false);
        }
        deadline.check()?;
        self.store.set(NOTES_KEY, &notes).await?;
        Ok(true)
    }
}
