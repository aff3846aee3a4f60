pub mod activities;
pub mod db;
pub mod error;
pub mod history;
pub mod insights;
pub mod models;
pub mod session;
pub mod settings;
pub mod store;
mod utils;

use std::{env, path::PathBuf};

use anyhow::{anyhow, Context, Result};

pub use activities::ActivityCatalog;
pub use error::{MoodError, MoodResult, PersistenceError, ValidationError};
pub use history::{LoadStatus, MoodLog};
pub use insights::{DailyCount, MoodInsights, TimeOfDay, Trend};
pub use models::{Activity, ActivityDuration, MoodDescriptor, MoodEntry, WeatherDescriptor};
pub use session::{CurrentSelection, MoodMate};
pub use settings::SettingsStore;
pub use store::{EntryStore, MemoryEntryStore, SqliteEntryStore};

pub const DATA_DIR_ENV: &str = "MOODMATE_DATA_DIR";
pub const DEBUG_ENV: &str = "MOODMATE_DEBUG";

/// Info by default, debug when `MOODMATE_DEBUG` is set. `RUST_LOG` still applies on top.
pub fn init_logging() {
    let debug = env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true"))
        .unwrap_or(false);
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A host that already installed a logger keeps it.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Where the database and settings live.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("moodmate"))
        .ok_or_else(|| anyhow!("no data directory; set {DATA_DIR_ENV}"))
}

pub fn run() -> Result<()> {
    init_logging();

    log::info!("MoodMate starting up...");

    let data_dir = data_dir()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    runtime.block_on(async move {
        let session = MoodMate::open(&data_dir)?;
        let history = session.initialize().await;
        if let LoadStatus::Degraded(reason) = session.log().load_status() {
            log::warn!("History unavailable, starting empty: {reason}");
        }

        let summary = session.insights();
        println!("Mood history in {}", data_dir.display());
        println!("  Entries:            {}", summary.total_entries);
        println!(
            "  Most frequent mood: {}",
            summary
                .most_frequent_mood
                .as_ref()
                .map(|mood| format!("{} {}", mood.emoji, mood.label))
                .unwrap_or_else(|| insights::NOT_ENOUGH_DATA.to_string())
        );
        println!("  Best time of day:   {}", summary.best_time_of_day);
        println!("  Trend:              {}", summary.trend);

        println!();
        for day in session.weekly_chart() {
            println!("  {} {:>3} {}", day.day_label, day.count, "#".repeat(day.count));
        }

        if let Some(latest) = history.first() {
            println!();
            println!(
                "Last entry: {} {} at {}",
                latest.mood.emoji,
                latest.mood.label,
                latest.timestamp.format("%Y-%m-%d %H:%M UTC")
            );
            if latest.has_note() {
                println!("  \"{}\"", latest.note);
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}
