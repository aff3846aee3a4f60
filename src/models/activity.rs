//! Activity suggestion records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityDuration {
    Quick,
    Short,
    Medium,
    Long,
}

impl ActivityDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityDuration::Quick => "quick",
            ActivityDuration::Short => "short",
            ActivityDuration::Medium => "medium",
            ActivityDuration::Long => "long",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityDuration::Quick => "5-15 mins",
            ActivityDuration::Short => "15-30 mins",
            ActivityDuration::Medium => "30-60 mins",
            ActivityDuration::Long => "60+ mins",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodImpact {
    Low,
    Medium,
    High,
}

impl MoodImpact {
    pub fn label(&self) -> &'static str {
        match self {
            MoodImpact::Low => "Subtle mood lift",
            MoodImpact::Medium => "Noticeable improvement",
            MoodImpact::High => "Significant boost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: ActivityDuration,
    pub impact: MoodImpact,
    pub benefits: Vec<String>,
    pub indoor: bool,
}
