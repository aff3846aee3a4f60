//! Durable persistence of the mood history as one serialized document.
//!
//! The history is always written whole: a JSON array of [`MoodEntry`] objects under a
//! single named slot. Backends only move that document around; encoding, legacy
//! migration and integrity checks live here so every backend reads the same format.

mod memory;
mod sqlite;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::PersistenceError;
use crate::models::{find_mood, new_entry_id, MoodDescriptor, MoodEntry};

pub use memory::MemoryEntryStore;
pub use sqlite::SqliteEntryStore;

/// Slot holding the serialized history.
pub const HISTORY_KEY: &str = "moodHistory";

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Missing history loads as an empty vector; undecodable history is `CorruptData`.
    async fn load(&self) -> Result<Vec<MoodEntry>, PersistenceError>;

    /// Replace the stored history with `entries`. A failed save leaves the previous
    /// document readable.
    async fn save(&self, entries: &[MoodEntry]) -> Result<(), PersistenceError>;

    /// Copy the stored document aside, leaving it in place, and return where it went.
    /// `None` when nothing is stored.
    async fn back_up(&self) -> Result<Option<String>, PersistenceError>;
}

// Entries written before ids existed have no `id` field.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    id: Option<String>,
    mood: MoodDescriptor,
    #[serde(default)]
    note: String,
    timestamp: DateTime<Utc>,
}

pub(crate) struct DecodedHistory {
    pub entries: Vec<MoodEntry>,
    /// Number of legacy entries that were given a fresh id while decoding.
    pub assigned_ids: usize,
}

pub(crate) fn decode_history(raw: &str) -> Result<DecodedHistory, PersistenceError> {
    let stored: Vec<StoredEntry> = serde_json::from_str(raw)
        .map_err(|err| PersistenceError::CorruptData(err.to_string()))?;

    let mut seen = HashSet::with_capacity(stored.len());
    let mut assigned_ids = 0;
    let mut entries = Vec::with_capacity(stored.len());

    for (index, item) in stored.into_iter().enumerate() {
        if item.mood.id.is_empty() || find_mood(&item.mood.id).is_none() {
            return Err(PersistenceError::CorruptData(format!(
                "entry {index} has unknown mood '{}'",
                item.mood.id
            )));
        }

        let id = match item.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                assigned_ids += 1;
                new_entry_id()
            }
        };

        if !seen.insert(id.clone()) {
            return Err(PersistenceError::CorruptData(format!(
                "duplicate entry id {id}"
            )));
        }

        entries.push(MoodEntry {
            id,
            mood: item.mood,
            note: item.note,
            timestamp: item.timestamp,
        });
    }

    Ok(DecodedHistory {
        entries,
        assigned_ids,
    })
}

pub(crate) fn encode_history(entries: &[MoodEntry]) -> Result<String, PersistenceError> {
    serde_json::to_string(entries).map_err(|err| PersistenceError::WriteFailed(err.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::{find_mood, MoodEntry};

    pub fn entry(id: &str, mood_id: &str, timestamp: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            id: id.to_string(),
            mood: find_mood(mood_id).unwrap(),
            note: String::new(),
            timestamp,
        }
    }

    pub fn sample_history() -> Vec<MoodEntry> {
        let mut noted = entry("b", "calm", Utc.with_ymd_and_hms(2024, 5, 2, 18, 45, 0).unwrap());
        noted.note = "tea on the balcony".into();
        vec![
            entry("a", "happy", Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
            noted,
            entry("c", "peaceful", Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap()),
        ]
    }
}
