use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::insights::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::models::ActivityDuration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightSettings {
    pub chart_window_days: u32,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            chart_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl InsightSettings {
    pub fn window_days(&self) -> u32 {
        self.chart_window_days.clamp(1, MAX_WINDOW_DAYS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionSettings {
    pub duration_filter: Option<ActivityDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub insights: InsightSettings,
    pub suggestions: SuggestionSettings,
}

/// User preferences persisted as a JSON file next to the database.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> UserSettings {
        self.read().clone()
    }

    pub fn insights(&self) -> InsightSettings {
        self.read().insights.clone()
    }

    pub fn suggestions(&self) -> SuggestionSettings {
        self.read().suggestions.clone()
    }

    pub fn update_insights(&self, settings: InsightSettings) -> Result<()> {
        self.update(|data| data.insights = settings)
    }

    pub fn update_suggestions(&self, settings: SuggestionSettings) -> Result<()> {
        self.update(|data| data.suggestions = settings)
    }

    /// Apply `change` and write the result. The in-memory copy only changes once the
    /// file is written.
    fn update(&self, change: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut guard = self.write();
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    // Write to a sibling temp file and rename over the target so readers never see a
    // half-written file.
    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }

        let serialized = serde_json::to_string_pretty(data)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)
            .with_context(|| format!("Failed to write settings to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace settings at {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get(), UserSettings::default());
        assert_eq!(store.insights().window_days(), 7);
        assert_eq!(store.suggestions().duration_filter, None);
    }

    #[test]
    fn updates_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let store = SettingsStore::new(path.clone()).unwrap();
            store
                .update_suggestions(SuggestionSettings {
                    duration_filter: Some(ActivityDuration::Quick),
                })
                .unwrap();
            store
                .update_insights(InsightSettings {
                    chart_window_days: 14,
                })
                .unwrap();
        }

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(
            reloaded.suggestions().duration_filter,
            Some(ActivityDuration::Quick)
        );
        assert_eq!(reloaded.insights().window_days(), 14);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_or_broken_files_fall_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, r#"{"suggestions": {"durationFilter": "long"}}"#).unwrap();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(
            store.suggestions().duration_filter,
            Some(ActivityDuration::Long)
        );
        assert_eq!(store.insights(), InsightSettings::default());

        fs::write(&path, "{{{").unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.get(), UserSettings::default());
    }

    #[test]
    fn window_is_clamped() {
        assert_eq!(InsightSettings { chart_window_days: 0 }.window_days(), 1);
        assert_eq!(InsightSettings { chart_window_days: 90 }.window_days(), 31);
    }
}
