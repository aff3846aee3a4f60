//! The persisted unit of the mood history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mood::{find_mood, is_known_mood, MoodDescriptor};
use crate::error::ValidationError;

pub const MAX_NOTE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Stable key for update/remove. Timestamps may collide, ids never do.
    pub id: String,
    pub mood: MoodDescriptor,
    /// Trimmed; empty means the user left no note.
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

impl MoodEntry {
    /// Build a validated entry for `mood` at `timestamp` with a fresh id.
    pub fn new(
        mood: MoodDescriptor,
        note: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            id: new_entry_id(),
            mood,
            note: note.trim().to_string(),
            timestamp,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Resolve a catalog mood id chosen in the UI and stamp the entry with the current time.
    pub fn record(mood_id: &str, note: &str) -> Result<Self, ValidationError> {
        let mood =
            find_mood(mood_id).ok_or_else(|| ValidationError::InvalidMood(mood_id.to_string()))?;
        Self::new(mood, note, Utc::now())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_known_mood(&self.mood.id) {
            return Err(ValidationError::InvalidMood(self.mood.id.clone()));
        }

        let len = self.note.chars().count();
        if len > MAX_NOTE_CHARS {
            return Err(ValidationError::NoteTooLong {
                len,
                max: MAX_NOTE_CHARS,
            });
        }

        Ok(())
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    pub fn utc_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 15, 0).unwrap()
    }

    #[test]
    fn note_is_trimmed_and_id_generated() {
        let mood = find_mood("calm").unwrap();
        let a = MoodEntry::new(mood.clone(), "  long walk \n", at(9)).unwrap();
        let b = MoodEntry::new(mood, "", at(9)).unwrap();

        assert_eq!(a.note, "long walk");
        assert!(a.has_note());
        assert!(!b.has_note());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn unknown_mood_is_rejected() {
        assert_eq!(
            MoodEntry::record("grumpy", ""),
            Err(ValidationError::InvalidMood("grumpy".into()))
        );

        let blank = MoodDescriptor {
            id: String::new(),
            emoji: String::new(),
            label: String::new(),
            color: String::new(),
        };
        assert!(matches!(
            MoodEntry::new(blank, "", at(9)),
            Err(ValidationError::InvalidMood(_))
        ));
    }

    #[test]
    fn note_length_counts_characters_after_trim() {
        let mood = find_mood("happy").unwrap();
        let exactly_max = "é".repeat(MAX_NOTE_CHARS);
        assert!(MoodEntry::new(mood.clone(), &format!("  {exactly_max}  "), at(9)).is_ok());

        let too_long = "x".repeat(MAX_NOTE_CHARS + 1);
        assert_eq!(
            MoodEntry::new(mood, &too_long, at(9)),
            Err(ValidationError::NoteTooLong {
                len: MAX_NOTE_CHARS + 1,
                max: MAX_NOTE_CHARS
            })
        );
    }

    #[test]
    fn serialized_shape_matches_stored_history() {
        let entry = MoodEntry {
            id: "e1".into(),
            mood: find_mood("sad").unwrap(),
            note: "rainy commute".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["mood"]["id"], "sad");
        assert_eq!(value["note"], "rainy commute");
        assert_eq!(value["timestamp"], "2024-01-15T10:30:00Z");
    }
}
