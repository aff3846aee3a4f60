use async_trait::async_trait;
use chrono::Utc;

use super::{decode_history, encode_history, EntryStore, HISTORY_KEY};
use crate::db::{
    repositories::kv_store::{read_slot, write_slot},
    Database,
};
use crate::error::PersistenceError;
use crate::models::MoodEntry;
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

enum LoadOutcome {
    Missing,
    Loaded {
        entries: Vec<MoodEntry>,
        migrated: usize,
    },
    Quarantined {
        reason: String,
        backup_key: String,
    },
}

/// History stored in one row of the `kv_store` table.
#[derive(Clone)]
pub struct SqliteEntryStore {
    db: Database,
    key: String,
}

impl SqliteEntryStore {
    pub fn new(db: Database) -> Self {
        Self::with_key(db, HISTORY_KEY)
    }

    pub fn with_key(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Prefix of the slots that receive undecodable history documents.
    pub fn backup_prefix(&self) -> String {
        format!("{}.corrupt.", self.key)
    }

    /// Prefix of the slots that keep history a failed load never read.
    pub fn unread_prefix(&self) -> String {
        format!("{}.unread.", self.key)
    }
}

#[async_trait]
impl EntryStore for SqliteEntryStore {
    async fn load(&self) -> Result<Vec<MoodEntry>, PersistenceError> {
        let key = self.key.clone();
        let backup_prefix = self.backup_prefix();

        // Read, legacy migration and quarantine share one transaction.
        let outcome = self
            .db
            .execute(move |conn| {
                let now = Utc::now();
                let tx = conn.transaction()?;

                let Some(record) = read_slot(&tx, &key)? else {
                    return Ok(LoadOutcome::Missing);
                };

                match decode_history(&record.value) {
                    Ok(decoded) => {
                        if decoded.assigned_ids > 0 {
                            let raw = encode_history(&decoded.entries)?;
                            write_slot(&tx, &key, &raw, now)?;
                        }
                        tx.commit()?;
                        Ok(LoadOutcome::Loaded {
                            entries: decoded.entries,
                            migrated: decoded.assigned_ids,
                        })
                    }
                    Err(err) => {
                        let backup_key = format!("{backup_prefix}{}", now.timestamp_millis());
                        write_slot(&tx, &backup_key, &record.value, now)?;
                        tx.execute("DELETE FROM kv_store WHERE key = ?1", [&key])?;
                        tx.commit()?;
                        Ok(LoadOutcome::Quarantined {
                            reason: err.to_string(),
                            backup_key,
                        })
                    }
                }
            })
            .await
            .map_err(|err| {
                log_error!("Failed to read mood history: {err:#}");
                PersistenceError::CorruptData(format!("failed to read mood history: {err:#}"))
            })?;

        match outcome {
            LoadOutcome::Missing => Ok(Vec::new()),
            LoadOutcome::Loaded { entries, migrated } => {
                if migrated > 0 {
                    log_info!("Assigned ids to {migrated} legacy mood entries");
                }
                Ok(entries)
            }
            LoadOutcome::Quarantined { reason, backup_key } => {
                log_warn!("Mood history was unreadable ({reason}); moved to '{backup_key}'");
                Err(PersistenceError::CorruptData(reason))
            }
        }
    }

    async fn save(&self, entries: &[MoodEntry]) -> Result<(), PersistenceError> {
        let raw = encode_history(entries)?;
        let key = self.key.clone();

        self.db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                write_slot(&tx, &key, &raw, Utc::now())?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|err| {
                log_error!("Failed to persist mood history: {err:#}");
                PersistenceError::WriteFailed(format!("{err:#}"))
            })
    }

    async fn back_up(&self) -> Result<Option<String>, PersistenceError> {
        let key = self.key.clone();
        let unread_prefix = self.unread_prefix();

        self.db
            .execute(move |conn| {
                let now = Utc::now();
                let tx = conn.transaction()?;

                let Some(record) = read_slot(&tx, &key)? else {
                    return Ok(None);
                };

                let backup_key = format!("{unread_prefix}{}", now.timestamp_millis());
                write_slot(&tx, &backup_key, &record.value, now)?;
                tx.commit()?;
                Ok(Some(backup_key))
            })
            .await
            .map_err(|err| {
                log_error!("Failed to back up mood history: {err:#}");
                PersistenceError::WriteFailed(format!("{err:#}"))
            })
    }
}
