use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::{decode_history, encode_history, EntryStore};
use crate::error::PersistenceError;
use crate::models::MoodEntry;

/// Volatile store holding the serialized history in memory.
///
/// Goes through the same encode/decode path as the durable backend, which makes it
/// suitable for previews and for exercising failure handling: writes can be forced to
/// fail, loads can fail or be slowed down, and back-ups are kept for inspection.
#[derive(Default)]
pub struct MemoryEntryStore {
    document: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    fail_loads: AtomicBool,
    backups: Mutex<Vec<String>>,
    load_delay: Option<Duration>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored document, as if a previous session had written it.
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(raw.into())),
            ..Self::default()
        }
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make loads fail without touching the stored document.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn backups(&self) -> Vec<String> {
        match self.backups.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.lock_document().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock_document(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.document.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn load(&self) -> Result<Vec<MoodEntry>, PersistenceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistenceError::CorruptData(
                "simulated read failure".into(),
            ));
        }

        let raw = self.document();
        match raw {
            Some(raw) => decode_history(&raw).map(|decoded| decoded.entries),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, entries: &[MoodEntry]) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteFailed(
                "simulated write failure".into(),
            ));
        }

        let raw = encode_history(entries)?;
        *self.lock_document() = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn back_up(&self) -> Result<Option<String>, PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteFailed(
                "simulated write failure".into(),
            ));
        }

        let Some(raw) = self.document() else {
            return Ok(None);
        };

        let mut backups = match self.backups.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        backups.push(raw);
        Ok(Some(format!("backup #{}", backups.len())))
    }
}
