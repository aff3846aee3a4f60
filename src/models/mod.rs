pub mod activity;
pub mod entry;
pub mod mood;
pub mod weather;

pub use activity::{Activity, ActivityDuration, MoodImpact};
pub use entry::{new_entry_id, MoodEntry, MAX_NOTE_CHARS};
pub use mood::{extra_moods, find_mood, primary_moods, MoodDescriptor};
pub use weather::{
    find_weather, weather_for_condition, weather_types, WeatherDescriptor, WeatherProvider,
    WeatherReading,
};
