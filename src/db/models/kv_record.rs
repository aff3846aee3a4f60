//! Row model for the `kv_store` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named slot and the serialized document stored in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KvRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
