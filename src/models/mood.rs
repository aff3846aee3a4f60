//! Mood catalog.
//!
//! The primary moods are offered on the home screen; the extra moods sit behind the
//! "more moods" step. Both sets resolve through [`find_mood`], which is the only way an
//! id coming from the UI becomes a [`MoodDescriptor`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodDescriptor {
    pub id: String,
    pub emoji: String,
    pub label: String,
    pub color: String,
}

// (id, emoji, label, color)
const PRIMARY_MOODS: &[(&str, &str, &str, &str)] = &[
    ("happy", "😊", "Happy", "#FFD700"),
    ("calm", "😌", "Calm", "#98FB98"),
    ("sad", "😢", "Sad", "#87CEEB"),
    ("energetic", "⚡", "Energetic", "#FFA500"),
    ("tired", "😴", "Tired", "#DDA0DD"),
    ("anxious", "😰", "Anxious", "#F08080"),
];

const EXTRA_MOODS: &[(&str, &str, &str, &str)] = &[
    ("peaceful", "🕊️", "Peaceful", "#B0E0E6"),
    ("grateful", "🙏", "Grateful", "#F4A460"),
    ("stressed", "😣", "Stressed", "#CD5C5C"),
    ("bored", "😐", "Bored", "#C0C0C0"),
];

fn descriptor(row: &(&str, &str, &str, &str)) -> MoodDescriptor {
    let (id, emoji, label, color) = *row;
    MoodDescriptor {
        id: id.to_string(),
        emoji: emoji.to_string(),
        label: label.to_string(),
        color: color.to_string(),
    }
}

pub fn primary_moods() -> Vec<MoodDescriptor> {
    PRIMARY_MOODS.iter().map(descriptor).collect()
}

pub fn extra_moods() -> Vec<MoodDescriptor> {
    EXTRA_MOODS.iter().map(descriptor).collect()
}

/// Look up a mood by id across both the primary and extra sets.
pub fn find_mood(id: &str) -> Option<MoodDescriptor> {
    PRIMARY_MOODS
        .iter()
        .chain(EXTRA_MOODS.iter())
        .find(|row| row.0 == id)
        .map(descriptor)
}

pub fn is_known_mood(id: &str) -> bool {
    !id.is_empty() && find_mood(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mood_ids_are_unique_across_both_sets() {
        let mut seen = HashSet::new();
        for mood in primary_moods().into_iter().chain(extra_moods()) {
            assert!(seen.insert(mood.id.clone()), "duplicate mood id {}", mood.id);
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn extra_moods_resolve_like_primary_ones() {
        assert_eq!(find_mood("peaceful").map(|m| m.label), Some("Peaceful".into()));
        assert_eq!(find_mood("happy").map(|m| m.color), Some("#FFD700".into()));
        assert!(find_mood("grumpy").is_none());
        assert!(!is_known_mood(""));
    }
}
