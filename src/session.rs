//! Per-session facade tying the history, the activity catalog and the user's current
//! mood/weather selection together. The UI layer holds one of these.

use std::{
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::activities::ActivityCatalog;
use crate::db::Database;
use crate::error::{MoodResult, ValidationError};
use crate::history::MoodLog;
use crate::insights::{self, DailyCount, MoodInsights};
use crate::models::{
    find_weather, Activity, ActivityDuration, MoodDescriptor, MoodEntry, WeatherDescriptor,
    WeatherProvider, WeatherReading,
};
use crate::settings::SettingsStore;
use crate::store::SqliteEntryStore;

pub const DATABASE_FILE: &str = "moodmate.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";

/// What the user picked this session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSelection {
    pub current_mood: Option<MoodDescriptor>,
    pub current_weather: Option<WeatherDescriptor>,
}

impl CurrentSelection {
    /// Suggestions need both a mood and a weather.
    pub fn is_complete(&self) -> bool {
        self.current_mood.is_some() && self.current_weather.is_some()
    }
}

pub struct MoodMate {
    log: MoodLog,
    catalog: ActivityCatalog,
    settings: SettingsStore,
    selection: RwLock<CurrentSelection>,
}

impl MoodMate {
    pub fn new(log: MoodLog, catalog: ActivityCatalog, settings: SettingsStore) -> Self {
        Self {
            log,
            catalog,
            settings,
            selection: RwLock::new(CurrentSelection::default()),
        }
    }

    /// Open the on-disk database and settings under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let db = Database::new(data_dir.join(DATABASE_FILE))?;
        let store = SqliteEntryStore::new(db);
        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;

        Ok(Self::new(
            MoodLog::new(Arc::new(store)),
            ActivityCatalog::builtin(),
            settings,
        ))
    }

    pub fn log(&self) -> &MoodLog {
        &self.log
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub async fn initialize(&self) -> Vec<MoodEntry> {
        self.log.initialize().await
    }

    /// Record a mood picked in the UI and make it the current mood.
    pub async fn submit_mood(&self, mood_id: &str, note: &str) -> MoodResult<MoodEntry> {
        let entry = MoodEntry::record(mood_id, note)?;
        self.log.append(entry.clone()).await?;
        self.write_selection().current_mood = Some(entry.mood.clone());
        Ok(entry)
    }

    pub async fn edit_note(&self, id: &str, note: &str) -> MoodResult<MoodEntry> {
        let note = note.trim().to_string();
        self.log.edit(id, move |entry| entry.note = note).await
    }

    pub async fn delete_entry(&self, id: &str) -> MoodResult<()> {
        self.log.remove(id).await
    }

    pub fn select_weather(&self, weather_id: &str) -> MoodResult<WeatherDescriptor> {
        let weather = find_weather(weather_id)
            .ok_or_else(|| ValidationError::UnknownWeather(weather_id.to_string()))?;
        self.write_selection().current_weather = Some(weather.clone());
        Ok(weather)
    }

    /// Use a provider reading as the perceived weather.
    pub fn apply_weather_reading(&self, reading: &WeatherReading) -> WeatherDescriptor {
        let weather = reading.descriptor();
        self.write_selection().current_weather = Some(weather.clone());
        weather
    }

    /// Ask `provider` for the weather at a location and select it. A provider failure
    /// leaves the current selection as it was.
    pub async fn detect_weather(
        &self,
        provider: &dyn WeatherProvider,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherDescriptor> {
        let reading = provider.fetch_current_weather(lat, lon).await?;
        Ok(self.apply_weather_reading(&reading))
    }

    pub fn current_selection(&self) -> CurrentSelection {
        self.read_selection().clone()
    }

    pub fn clear_selection(&self) {
        *self.write_selection() = CurrentSelection::default();
    }

    /// Suggestions for the current selection using the saved duration preference.
    pub fn suggestions(&self) -> Vec<Activity> {
        self.suggestions_with(self.settings.suggestions().duration_filter)
    }

    pub fn suggestions_with(&self, duration_filter: Option<ActivityDuration>) -> Vec<Activity> {
        let selection = self.current_selection();
        match (selection.current_mood, selection.current_weather) {
            (Some(mood), Some(weather)) => {
                self.catalog
                    .suggestions_for(&mood.id, &weather.id, duration_filter)
            }
            _ => Vec::new(),
        }
    }

    pub fn insights(&self) -> MoodInsights {
        insights::summarize(&self.log.snapshot())
    }

    pub fn weekly_chart(&self) -> Vec<DailyCount> {
        insights::daily_counts(
            &self.log.snapshot(),
            self.settings.insights().window_days(),
        )
    }

    pub fn history_by_date(&self) -> Vec<(NaiveDate, Vec<MoodEntry>)> {
        insights::group_by_calendar_date(&self.log.snapshot())
    }

    fn read_selection(&self) -> RwLockReadGuard<'_, CurrentSelection> {
        match self.selection.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_selection(&self) -> RwLockWriteGuard<'_, CurrentSelection> {
        match self.selection.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
