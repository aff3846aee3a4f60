use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};

use crate::error::{MoodError, MoodResult, ValidationError};
use crate::models::MoodEntry;
use crate::store::EntryStore;
use crate::{log_debug, log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "reason")]
pub enum LoadStatus {
    Pending,
    Ready,
    /// The stored history could not be read; the session runs on an empty log.
    Degraded(String),
}

struct MoodLogInner {
    store: Arc<dyn EntryStore>,
    /// Insertion order. Replaced wholesale after each successful persist.
    entries: RwLock<Arc<Vec<MoodEntry>>>,
    /// Serializes read-modify-persist cycles.
    write_gate: Mutex<()>,
    loaded: OnceCell<LoadStatus>,
    /// Set once the history a degraded load could not read has been copied aside.
    unread_preserved: AtomicBool,
}

/// The session's mood history.
///
/// Cheap to clone; clones share state. Readers never wait on a pending mutation: they
/// see the last successfully persisted collection.
#[derive(Clone)]
pub struct MoodLog {
    inner: Arc<MoodLogInner>,
}

impl MoodLog {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            inner: Arc::new(MoodLogInner {
                store,
                entries: RwLock::new(Arc::new(Vec::new())),
                write_gate: Mutex::new(()),
                loaded: OnceCell::new(),
                unread_preserved: AtomicBool::new(false),
            }),
        }
    }

    /// Load the stored history once. Concurrent callers share the same load; later
    /// calls return the current snapshot without touching the store.
    pub async fn initialize(&self) -> Vec<MoodEntry> {
        self.inner
            .loaded
            .get_or_init(|| async {
                match self.inner.store.load().await {
                    Ok(entries) => {
                        log_info!("Loaded {} mood entries", entries.len());
                        self.publish(entries);
                        LoadStatus::Ready
                    }
                    Err(err) => {
                        log_error!("Mood history unavailable, starting empty: {err}");
                        LoadStatus::Degraded(err.to_string())
                    }
                }
            })
            .await;

        self.snapshot()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.inner
            .loaded
            .get()
            .cloned()
            .unwrap_or(LoadStatus::Pending)
    }

    pub async fn append(&self, entry: MoodEntry) -> MoodResult<()> {
        entry.validate()?;

        self.commit("append", move |entries| {
            if entries.iter().any(|existing| existing.id == entry.id) {
                return Err(ValidationError::DuplicateEntry(entry.id.clone()).into());
            }
            entries.push(entry);
            Ok(())
        })
        .await
    }

    /// Replace the entry with `id`. The replacement keeps `id` whatever its own id is.
    pub async fn update(&self, id: &str, mut new_entry: MoodEntry) -> MoodResult<()> {
        new_entry.validate()?;
        new_entry.id = id.to_string();

        let id = id.to_string();
        self.commit("update", move |entries| {
            let slot = entries
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or_else(|| MoodError::not_found(id.clone()))?;
            *slot = new_entry;
            Ok(())
        })
        .await
    }

    /// Change the entry with `id` in place and return the result. `change` runs on the
    /// latest committed entry under the write gate; the id survives whatever it does.
    pub async fn edit<F>(&self, id: &str, change: F) -> MoodResult<MoodEntry>
    where
        F: FnOnce(&mut MoodEntry) + Send,
    {
        let id = id.to_string();
        self.commit("edit", move |entries| {
            let slot = entries
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or_else(|| MoodError::not_found(id.clone()))?;

            let mut edited = slot.clone();
            change(&mut edited);
            edited.id = id.clone();
            edited.validate()?;

            *slot = edited.clone();
            Ok(edited)
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> MoodResult<()> {
        let id = id.to_string();
        self.commit("remove", move |entries| {
            let position = entries
                .iter()
                .position(|existing| existing.id == id)
                .ok_or_else(|| MoodError::not_found(id.clone()))?;
            entries.remove(position);
            Ok(())
        })
        .await
    }

    /// Copy of the history, most recent first.
    pub fn snapshot(&self) -> Vec<MoodEntry> {
        let mut entries = (*self.current()).clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn get(&self, id: &str) -> Option<MoodEntry> {
        self.current().iter().find(|entry| entry.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    fn current(&self) -> Arc<Vec<MoodEntry>> {
        let guard = match self.inner.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }

    fn publish(&self, entries: Vec<MoodEntry>) {
        let mut guard = match self.inner.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(entries);
    }

    /// Apply `mutate` to a working copy, persist it, and only then make it visible.
    /// Any error leaves the published collection untouched.
    async fn commit<T, F>(&self, operation: &str, mutate: F) -> MoodResult<T>
    where
        F: FnOnce(&mut Vec<MoodEntry>) -> MoodResult<T>,
    {
        if self.inner.loaded.get().is_none() {
            self.initialize().await;
        }

        let _gate = self.inner.write_gate.lock().await;

        let mut working = (*self.current()).clone();
        let outcome = mutate(&mut working)?;

        self.preserve_unread_history().await?;

        if let Err(err) = self.inner.store.save(&working).await {
            log_warn!("Rolled back mood {operation}: {err}");
            return Err(err.into());
        }

        log_debug!("Mood {operation} persisted ({} entries)", working.len());
        self.publish(working);
        Ok(outcome)
    }

    /// After a degraded load the store may still hold history we never read. Copy it aside
    /// before the first save replaces it; if that fails, nothing is written.
    /// Callers hold the write gate.
    async fn preserve_unread_history(&self) -> MoodResult<()> {
        if !matches!(self.load_status(), LoadStatus::Degraded(_))
            || self.inner.unread_preserved.load(Ordering::SeqCst)
        {
            return Ok(());
        }

        match self.inner.store.back_up().await {
            Ok(Some(location)) => {
                log_warn!("Copied unread mood history to '{location}' before overwriting it");
            }
            Ok(None) => {}
            Err(err) => {
                log_error!("Not overwriting unread mood history: {err}");
                return Err(err.into());
            }
        }

        self.inner.unread_preserved.store(true, Ordering::SeqCst);
        Ok(())
    }
}
