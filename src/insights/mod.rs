//! Derived views over a snapshot of the mood history.
//!
//! Everything here is a pure function of the entries it is given. Nothing fails: thin
//! input yields `None` or a `NotEnoughData` variant instead of an error.

mod types;

pub use types::{DailyCount, MoodInsights, TimeOfDay, Trend, NOT_ENOUGH_DATA};

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, Local, NaiveDate, TimeZone, Timelike, Utc};

use crate::models::{MoodDescriptor, MoodEntry};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const MAX_WINDOW_DAYS: u32 = 31;

/// Moods that count towards an upward trend.
pub const POSITIVE_MOODS: &[&str] = &["happy", "energetic", "peaceful"];

const TREND_WINDOW: usize = 5;

/// Most logged mood. Ties go to the mood that appears first in `entries`.
pub fn most_frequent_mood(entries: &[MoodEntry]) -> Option<MoodDescriptor> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    // distinct moods in first-seen order
    let mut order: Vec<&MoodDescriptor> = Vec::new();

    for entry in entries {
        let count = counts.entry(entry.mood.id.as_str()).or_insert(0);
        if *count == 0 {
            order.push(&entry.mood);
        }
        *count += 1;
    }

    let mut best: Option<(&MoodDescriptor, usize)> = None;
    for mood in order {
        let count = counts[mood.id.as_str()];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((mood, count));
        }
    }

    best.map(|(mood, _)| mood.clone())
}

/// [`best_time_of_day_in`] using the device's local timezone.
pub fn best_time_of_day(entries: &[MoodEntry]) -> TimeOfDay {
    best_time_of_day_in(entries, &Local)
}

/// Bucket with the most entries by hour in `tz`. Ties prefer morning, then afternoon.
pub fn best_time_of_day_in<Tz: TimeZone>(entries: &[MoodEntry], tz: &Tz) -> TimeOfDay {
    if entries.is_empty() {
        return TimeOfDay::NotEnoughData;
    }

    let (mut morning, mut afternoon, mut evening) = (0usize, 0usize, 0usize);
    for entry in entries {
        match TimeOfDay::from_hour(entry.timestamp.with_timezone(tz).hour()) {
            TimeOfDay::Morning => morning += 1,
            TimeOfDay::Afternoon => afternoon += 1,
            _ => evening += 1,
        }
    }

    if morning >= afternoon && morning >= evening {
        TimeOfDay::Morning
    } else if afternoon >= evening {
        TimeOfDay::Afternoon
    } else {
        TimeOfDay::Evening
    }
}

/// Classify the five most recent entries by how many are positive.
pub fn weekly_trend(entries: &[MoodEntry]) -> Trend {
    if entries.len() < 2 {
        return Trend::NotEnoughData;
    }

    let mut chronological: Vec<&MoodEntry> = entries.iter().collect();
    chronological.sort_by_key(|entry| entry.timestamp);

    let recent = &chronological[chronological.len().saturating_sub(TREND_WINDOW)..];
    let positive = recent
        .iter()
        .filter(|entry| POSITIVE_MOODS.contains(&entry.mood.id.as_str()))
        .count();

    match positive {
        p if p >= 3 => Trend::TrendingUp,
        p if p <= 1 => Trend::TrendingDown,
        _ => Trend::Stable,
    }
}

/// Entry counts for the `window_days` UTC days ending today, oldest first. Windows longer
/// than [`MAX_WINDOW_DAYS`] are cut to that length.
pub fn daily_counts(entries: &[MoodEntry], window_days: u32) -> Vec<DailyCount> {
    daily_counts_until(entries, window_days, Utc::now().date_naive())
}

pub fn daily_counts_until(
    entries: &[MoodEntry],
    window_days: u32,
    today: NaiveDate,
) -> Vec<DailyCount> {
    let window_days = window_days.min(MAX_WINDOW_DAYS);
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for entry in entries {
        *per_day.entry(entry.utc_date()).or_insert(0) += 1;
    }

    (0..i64::from(window_days))
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            DailyCount {
                date,
                day_label: date.format("%a").to_string(),
                count: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Entries bucketed by UTC calendar date, newest date first. Each bucket keeps the
/// order of `entries`.
pub fn group_by_calendar_date(entries: &[MoodEntry]) -> Vec<(NaiveDate, Vec<MoodEntry>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<MoodEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.utc_date())
            .or_default()
            .push(entry.clone());
    }

    groups.into_iter().rev().collect()
}

pub fn summarize(entries: &[MoodEntry]) -> MoodInsights {
    MoodInsights {
        most_frequent_mood: most_frequent_mood(entries),
        best_time_of_day: best_time_of_day(entries),
        trend: weekly_trend(entries),
        total_entries: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::entry;
    use chrono::{DateTime, TimeZone};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, hour, minute, 0).unwrap()
    }

    fn moods(ids: &[&str]) -> Vec<MoodEntry> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| entry(&format!("e{i}"), id, at(1 + i as u32, 10, 0)))
            .collect()
    }

    #[test]
    fn most_frequent_tie_goes_to_first_seen() {
        let entries = moods(&["happy", "sad", "happy", "sad"]);
        assert_eq!(most_frequent_mood(&entries).unwrap().id, "happy");

        let entries = moods(&["sad", "happy", "happy", "sad"]);
        assert_eq!(most_frequent_mood(&entries).unwrap().id, "sad");

        let entries = moods(&["calm", "tired", "tired"]);
        assert_eq!(most_frequent_mood(&entries).unwrap().id, "tired");

        assert!(most_frequent_mood(&[]).is_none());
    }

    #[test]
    fn time_of_day_bucket_boundaries() {
        let cases = [
            (4, 0, TimeOfDay::Evening),
            (5, 0, TimeOfDay::Morning),
            (11, 59, TimeOfDay::Morning),
            (12, 0, TimeOfDay::Afternoon),
            (16, 59, TimeOfDay::Afternoon),
            (17, 0, TimeOfDay::Evening),
            (23, 30, TimeOfDay::Evening),
            (0, 0, TimeOfDay::Evening),
        ];

        for (hour, minute, expected) in cases {
            let entries = vec![entry("e", "calm", at(3, hour, minute))];
            assert_eq!(
                best_time_of_day_in(&entries, &Utc),
                expected,
                "{hour:02}:{minute:02}"
            );
        }
    }

    #[test]
    fn best_time_prefers_morning_then_afternoon_on_ties() {
        let entries = vec![
            entry("a", "calm", at(1, 20, 0)),
            entry("b", "calm", at(1, 13, 0)),
        ];
        assert_eq!(best_time_of_day_in(&entries, &Utc), TimeOfDay::Afternoon);

        let entries = vec![
            entry("a", "calm", at(1, 20, 0)),
            entry("b", "calm", at(1, 13, 0)),
            entry("c", "calm", at(1, 6, 0)),
        ];
        assert_eq!(best_time_of_day_in(&entries, &Utc), TimeOfDay::Morning);

        let entries = vec![
            entry("a", "calm", at(1, 20, 0)),
            entry("b", "calm", at(1, 2, 0)),
            entry("c", "calm", at(1, 6, 0)),
        ];
        assert_eq!(best_time_of_day_in(&entries, &Utc), TimeOfDay::Evening);

        assert_eq!(best_time_of_day(&[]), TimeOfDay::NotEnoughData);
    }

    #[test]
    fn trend_from_last_five_entries() {
        let up = moods(&["happy", "energetic", "sad", "tired", "happy"]);
        assert_eq!(weekly_trend(&up), Trend::TrendingUp);

        let down = moods(&["happy", "sad", "tired", "anxious", "calm"]);
        assert_eq!(weekly_trend(&down), Trend::TrendingDown);

        let stable = moods(&["happy", "peaceful", "sad", "tired", "calm"]);
        assert_eq!(weekly_trend(&stable), Trend::Stable);

        assert_eq!(weekly_trend(&[]), Trend::NotEnoughData);
        assert_eq!(weekly_trend(&moods(&["happy"])), Trend::NotEnoughData);
        assert_eq!(weekly_trend(&moods(&["happy", "happy"])), Trend::Stable);
    }

    #[test]
    fn trend_uses_most_recent_entries_whatever_the_input_order() {
        // Oldest three are positive, newest five are not.
        let mut entries = moods(&[
            "happy", "happy", "happy", "sad", "sad", "tired", "anxious", "calm",
        ]);
        assert_eq!(weekly_trend(&entries), Trend::TrendingDown);

        entries.reverse();
        assert_eq!(weekly_trend(&entries), Trend::TrendingDown);
    }

    #[test]
    fn daily_counts_cover_the_window_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(); // a Sunday
        let entries = vec![
            entry("a", "calm", at(7, 0, 5)),
            entry("b", "calm", at(7, 23, 59)),
            entry("c", "sad", at(5, 12, 0)),
            entry("d", "sad", at(1, 9, 0)),
            entry("e", "sad", at(8, 9, 0)),
        ];

        let counts = daily_counts_until(&entries, DEFAULT_WINDOW_DAYS, today);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0].date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(counts[0].day_label, "Mon");
        assert_eq!(counts[6].day_label, "Sun");
        assert_eq!(
            counts.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![1, 0, 0, 0, 1, 0, 2]
        );

        assert!(daily_counts_until(&entries, 0, today).is_empty());
    }

    #[test]
    fn oversized_windows_are_capped() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
        let entries = vec![entry("a", "calm", at(7, 9, 0))];

        let counts = daily_counts_until(&entries, u32::MAX, today);
        assert_eq!(counts.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(counts.last().unwrap().date, today);
        assert_eq!(counts.last().unwrap().count, 1);

        assert_eq!(daily_counts(&[], u32::MAX).len(), MAX_WINDOW_DAYS as usize);
    }

    #[test]
    fn grouping_is_newest_date_first() {
        let entries = vec![
            entry("a", "calm", at(2, 8, 0)),
            entry("b", "sad", at(4, 8, 0)),
            entry("c", "happy", at(2, 20, 0)),
        ];

        let groups = group_by_calendar_date(&entries);
        let dates: Vec<_> = groups.iter().map(|(date, _)| date.to_string()).collect();
        assert_eq!(dates, vec!["2024-07-04", "2024-07-02"]);

        let ids: Vec<_> = groups[1].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn summary_bundles_all_cards() {
        let summary = summarize(&moods(&["happy", "energetic", "happy"]));
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.most_frequent_mood.unwrap().id, "happy");
        assert_eq!(summary.trend, Trend::TrendingUp);
        assert_eq!(summary.trend.to_string(), "Trending up");

        let empty = summarize(&[]);
        assert_eq!(empty.best_time_of_day.to_string(), NOT_ENOUGH_DATA);
        assert_eq!(empty.trend.label(), NOT_ENOUGH_DATA);
    }
}
