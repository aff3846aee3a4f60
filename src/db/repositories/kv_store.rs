use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::db::{helpers::parse_datetime, models::KvRecord, Database};

fn row_to_record(row: &Row) -> Result<KvRecord> {
    let updated_at: String = row.get("updated_at")?;

    Ok(KvRecord {
        key: row.get("key")?,
        value: row.get("value")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

/// Read a slot on an open connection. Used directly by callers that need to combine
/// the read with other statements inside one database task.
pub fn read_slot(conn: &Connection, key: &str) -> Result<Option<KvRecord>> {
    let mut stmt = conn.prepare(
        "SELECT key, value, updated_at
         FROM kv_store
         WHERE key = ?1",
    )?;

    let mut rows = stmt.query(params![key])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_record(row)?)),
        None => Ok(None),
    }
}

/// Insert or replace a slot. SQLite applies the statement atomically, so a failure
/// leaves the previous value in place.
pub fn write_slot(conn: &Connection, key: &str, value: &str, now: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
        params![key, value, now.to_rfc3339()],
    )
    .with_context(|| format!("failed to write slot '{key}'"))?;
    Ok(())
}

impl Database {
    pub async fn get_slot(&self, key: &str) -> Result<Option<KvRecord>> {
        let key = key.to_string();
        self.execute(move |conn| read_slot(conn, &key)).await
    }

    pub async fn put_slot(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| write_slot(conn, &key, &value, Utc::now()))
            .await
    }

    /// Keys starting with `prefix`, oldest write first.
    pub async fn list_slot_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("{}%", prefix.replace('%', "\\%").replace('_', "\\_"));
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM kv_store
                 WHERE key LIKE ?1 ESCAPE '\\'
                 ORDER BY updated_at ASC, key ASC",
            )?;

            let keys = stmt
                .query_map(params![pattern], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(keys)
        })
        .await
    }

    pub async fn delete_slot(&self, key: &str) -> Result<bool> {
        let key = key.to_string();
        self.execute(move |conn| {
            let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(removed > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn put_overwrites_and_get_reads_back() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("kv.sqlite3")).unwrap();

        assert!(db.get_slot("moodHistory").await.unwrap().is_none());

        db.put_slot("moodHistory", "[]".into()).await.unwrap();
        db.put_slot("moodHistory", "[1]".into()).await.unwrap();

        let record = db.get_slot("moodHistory").await.unwrap().unwrap();
        assert_eq!(record.key, "moodHistory");
        assert_eq!(record.value, "[1]");
    }

    #[tokio::test]
    async fn list_keys_treats_underscore_literally() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("kv.sqlite3")).unwrap();

        db.put_slot("a_b.1", "x".into()).await.unwrap();
        db.put_slot("axb.2", "y".into()).await.unwrap();

        assert_eq!(db.list_slot_keys("a_b").await.unwrap(), vec!["a_b.1"]);
        assert!(db.delete_slot("a_b.1").await.unwrap());
        assert!(!db.delete_slot("a_b.1").await.unwrap());
        assert!(db.list_slot_keys("a_b").await.unwrap().is_empty());
    }
}
