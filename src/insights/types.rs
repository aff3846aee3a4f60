use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MoodDescriptor;

pub const NOT_ENOUGH_DATA: &str = "Not enough data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    NotEnoughData,
}

impl TimeOfDay {
    /// Bucket for a local hour: morning is [5, 12), afternoon [12, 17), the rest evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::NotEnoughData => NOT_ENOUGH_DATA,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trend {
    TrendingUp,
    TrendingDown,
    Stable,
    NotEnoughData,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::TrendingUp => "Trending up",
            Trend::TrendingDown => "Trending down",
            Trend::Stable => "Stable",
            Trend::NotEnoughData => NOT_ENOUGH_DATA,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day_label: String,
    pub count: usize,
}

/// The insight cards shown above the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInsights {
    pub most_frequent_mood: Option<MoodDescriptor>,
    pub best_time_of_day: TimeOfDay,
    pub trend: Trend,
    pub total_entries: usize,
}
