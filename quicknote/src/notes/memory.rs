//! In-memory note backend
//!
//! Holds the collection in a `Vec` behind an async `RwLock`. Nothing
//! survives the process. Besides being the `memory` storage option, it is
//! the backend tests reach for, so it can be told to fail or stall via
//! [`MemoryBackendConfig`].

use super::{Note, NoteBackend, NoteId, WriteDeadline};
use crate::error::{QuickNoteError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Knobs for simulating a misbehaving backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackendConfig {
    /// Fail every `load`
    pub fail_reads: bool,

    /// Fail every `prepend` and `remove`
    pub fail_writes: bool,

    /// Sleep this long before every operation
    pub operation_delay_ms: Option<u64>,
}

/// Process-local note backend
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteBackend {
    notes: Arc<RwLock<Vec<Note>>>,
    config: Arc<RwLock<MemoryBackendConfig>>,
}

impl MemoryNoteBackend {
    /// Create an empty backend that behaves normally
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend with simulated behavior
    pub fn new_with_config(config: MemoryBackendConfig) -> Self {
        Self {
            notes: Arc::default(),
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Change simulated behavior mid-test
    pub async fn set_config(&self, config: MemoryBackendConfig) {
        *self.config.write().await = config;
    }

    async fn simulate(&self, write: bool, operation: &str) -> Result<()> {
        let config = self.config.read().await.clone();

        if let Some(delay) = config.operation_delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let failing = if write {
            config.fail_writes
        } else {
            config.fail_reads
        };
        if failing {
            return Err(QuickNoteError::storage(format!(
                "Simulated {operation} failure"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteBackend for MemoryNoteBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<Note>> {
        self.simulate(false, "load").await?;
        Ok(self.notes.read().await.clone())
    }

    async fn prepend(&self, note: Note, deadline: WriteDeadline) -> Result<()> {
        self.simulate(true, "prepend").await?;
        let mut notes = self.notes.write().await;
        deadline.check()?;
        notes.insert(0, note);
        Ok(())
    }

    async fn remove(&self, id: &NoteId, deadline: WriteDeadline) -> Result<bool> {
        self.simulate(true, "remove").await?;
        let mut notes = self.notes.write().await;
        deadline.check()?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        Ok(notes.len() != before)
    }
}
