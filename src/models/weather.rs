//! Weather catalog and the bridge from a provider reading to a catalog entry.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDescriptor {
    pub id: String,
    pub emoji: String,
    pub label: String,
}

const WEATHER_TYPES: &[(&str, &str, &str)] = &[
    ("sunny", "☀️", "Sunny"),
    ("cloudy", "☁️", "Cloudy"),
    ("rainy", "🌧️", "Rainy"),
    ("windy", "💨", "Windy"),
];

// OpenWeatherMap `weather[0].main` values we recognise.
const CONDITION_MAP: &[(&str, &str)] = &[
    ("Clear", "sunny"),
    ("Clouds", "cloudy"),
    ("Rain", "rainy"),
    ("Drizzle", "rainy"),
    ("Thunderstorm", "rainy"),
    ("Squall", "windy"),
    ("Tornado", "windy"),
];

fn descriptor(row: &(&str, &str, &str)) -> WeatherDescriptor {
    let (id, emoji, label) = *row;
    WeatherDescriptor {
        id: id.to_string(),
        emoji: emoji.to_string(),
        label: label.to_string(),
    }
}

pub fn weather_types() -> Vec<WeatherDescriptor> {
    WEATHER_TYPES.iter().map(descriptor).collect()
}

pub fn find_weather(id: &str) -> Option<WeatherDescriptor> {
    WEATHER_TYPES.iter().find(|row| row.0 == id).map(descriptor)
}

// Sunny.
fn default_weather() -> WeatherDescriptor {
    descriptor(&WEATHER_TYPES[0])
}

/// Map a provider condition (e.g. `"Clouds"`) onto one of the four catalog entries.
/// Unrecognised conditions fall back to sunny.
pub fn weather_for_condition(condition_main: &str) -> WeatherDescriptor {
    CONDITION_MAP
        .iter()
        .find(|(condition, _)| *condition == condition_main)
        .and_then(|(_, id)| find_weather(id))
        .unwrap_or_else(default_weather)
}

/// Current conditions as reported by a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub condition_main: String,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

impl WeatherReading {
    pub fn descriptor(&self) -> WeatherDescriptor {
        weather_for_condition(&self.condition_main)
    }

    /// Decode an OpenWeatherMap "current weather" payload (metric units).
    pub fn from_openweather_json(payload: &str) -> Result<Self> {
        let raw: OpenWeatherCurrent =
            serde_json::from_str(payload).context("invalid weather payload")?;
        let condition = raw
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("weather payload has no conditions"))?;

        Ok(Self {
            temperature_c: raw.main.temp,
            condition_main: condition.main,
            description: condition.description,
            humidity_pct: raw.main.humidity,
            wind_speed: raw.wind.map(|w| w.speed).unwrap_or(0.0),
        })
    }
}

#[derive(Deserialize)]
struct OpenWeatherCurrent {
    main: OpenWeatherMain,
    weather: Vec<OpenWeatherCondition>,
    wind: Option<OpenWeatherWind>,
}

#[derive(Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct OpenWeatherCondition {
    main: String,
    description: String,
}

#[derive(Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

/// Source of current weather for a location. Network and permission failures are the
/// provider's concern; callers only see an error.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current_weather(&self, lat: f64, lon: f64) -> Result<WeatherReading>;
}
