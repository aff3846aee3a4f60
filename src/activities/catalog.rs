use std::collections::HashMap;

use crate::models::{Activity, ActivityDuration, MoodImpact};

use crate::models::ActivityDuration::{Long, Medium, Quick, Short};
use crate::models::MoodImpact::{High, Medium as MediumImpact};

struct Row {
    mood: &'static str,
    weather: &'static str,
    id: &'static str,
    title: &'static str,
    description: &'static str,
    duration: ActivityDuration,
    impact: MoodImpact,
    benefits: &'static [&'static str],
    indoor: bool,
}

macro_rules! row {
    ($mood:literal / $weather:literal: $id:literal, $title:literal, $description:literal,
     $duration:expr, $impact:expr, [$($benefit:literal),*], indoor = $indoor:literal) => {
        Row {
            mood: $mood,
            weather: $weather,
            id: $id,
            title: $title,
            description: $description,
            duration: $duration,
            impact: $impact,
            benefits: &[$($benefit),*],
            indoor: $indoor,
        }
    };
}

const BUILTIN: &[Row] = &[
    row!("happy" / "sunny": "nature_walk", "Nature Walk",
        "Take an energizing walk in nature to boost your mood",
        Medium, High, ["Exercise", "Fresh air", "Nature connection"], indoor = false),
    row!("happy" / "sunny": "picnic", "Have a Picnic",
        "Enjoy a meal outdoors in the sunshine",
        Medium, High, ["Fresh air", "Joy", "Relaxation"], indoor = false),
    row!("happy" / "sunny": "photography_walk", "Photography Walk",
        "Capture beautiful moments on a sunny day",
        Medium, MediumImpact, ["Creativity", "Mindfulness", "Exercise"], indoor = false),
    row!("happy" / "cloudy": "cafe_visit", "Visit a Café",
        "Treat yourself to your favorite drink",
        Short, MediumImpact, ["Comfort", "Relaxation", "Change of scenery"], indoor = true),
    row!("happy" / "cloudy": "dance_party", "Indoor Dance Party",
        "Put on your favorite music and dance",
        Quick, High, ["Exercise", "Joy", "Energy boost"], indoor = true),
    row!("happy" / "rainy": "baking", "Bake Something",
        "Try a new recipe or bake your favorite treat",
        Long, High, ["Creativity", "Achievement", "Comfort"], indoor = true),
    row!("happy" / "rainy": "craft_project", "Start a Craft Project",
        "Channel your energy into something creative",
        Medium, MediumImpact, ["Creativity", "Focus", "Achievement"], indoor = true),
    row!("happy" / "windy": "fly_kite", "Fly a Kite",
        "Perfect weather for kite flying!",
        Medium, High, ["Fun", "Fresh air", "Play"], indoor = false),
    row!("anxious" / "sunny": "mindful_breathing", "Outdoor Breathing Exercise",
        "Find a quiet spot for deep breathing",
        Quick, High, ["Calming", "Mindfulness", "Fresh air"], indoor = false),
    row!("anxious" / "sunny": "gentle_yoga", "Gentle Outdoor Yoga",
        "Practice simple yoga poses in nature",
        Short, High, ["Relaxation", "Movement", "Grounding"], indoor = false),
    row!("anxious" / "cloudy": "journaling", "Mindful Journaling",
        "Write down your thoughts and feelings",
        Short, High, ["Self-reflection", "Clarity", "Relief"], indoor = true),
    row!("anxious" / "rainy": "tea_meditation", "Tea Meditation",
        "Practice mindfulness while enjoying tea",
        Short, MediumImpact, ["Calming", "Mindfulness", "Self-care"], indoor = true),
    row!("anxious" / "windy": "cozy_reading", "Cozy Reading Session",
        "Find a comfortable spot with a good book",
        Medium, MediumImpact, ["Distraction", "Comfort", "Relaxation"], indoor = true),
    row!("tired" / "sunny": "sun_break", "Quick Sun Break",
        "Take a 10-minute break in the sunshine",
        Quick, MediumImpact, ["Energy boost", "Vitamin D", "Fresh air"], indoor = false),
    row!("tired" / "sunny": "stretching", "Outdoor Stretching",
        "Do some gentle stretches in the fresh air",
        Short, MediumImpact, ["Energy", "Flexibility", "Awakening"], indoor = false),
    row!("tired" / "cloudy": "power_nap", "Power Nap",
        "Take a short refreshing nap",
        Quick, High, ["Rest", "Rejuvenation", "Energy"], indoor = true),
    row!("tired" / "rainy": "relaxing_bath", "Relaxing Bath",
        "Take a warm bath with calming scents",
        Medium, High, ["Relaxation", "Self-care", "Comfort"], indoor = true),
    row!("tired" / "windy": "energy_smoothie", "Make an Energy Smoothie",
        "Blend a nutritious energy-boosting smoothie",
        Quick, MediumImpact, ["Nutrition", "Energy", "Self-care"], indoor = true),
    row!("calm" / "sunny": "garden_mindfulness", "Garden Mindfulness",
        "Spend time tending to plants mindfully",
        Medium, High, ["Nature connection", "Mindfulness", "Peace"], indoor = false),
    row!("calm" / "cloudy": "cloud_watching", "Cloud Watching",
        "Find a comfortable spot to watch the clouds",
        Short, MediumImpact, ["Relaxation", "Mindfulness", "Peace"], indoor = false),
    row!("calm" / "rainy": "rain_meditation", "Rain Meditation",
        "Meditate to the sound of rainfall",
        Short, High, ["Peace", "Mindfulness", "Connection"], indoor = true),
    row!("calm" / "windy": "wind_chimes", "Listen to Wind Chimes",
        "Practice mindful listening with wind chimes",
        Short, MediumImpact, ["Mindfulness", "Peace", "Present moment"], indoor = true),
    row!("energetic" / "sunny": "hiit_workout", "Outdoor HIIT Workout",
        "Do a high-intensity interval training session",
        Short, High, ["Exercise", "Energy release", "Endorphins"], indoor = false),
    row!("energetic" / "cloudy": "dance_workout", "Dance Workout",
        "Follow an energetic dance workout video",
        Medium, High, ["Fun", "Exercise", "Expression"], indoor = true),
    row!("energetic" / "rainy": "indoor_exercise", "Living Room Workout",
        "Do a full-body workout at home",
        Medium, High, ["Strength", "Energy release", "Achievement"], indoor = true),
    row!("energetic" / "windy": "run_intervals", "Running Intervals",
        "Do interval training in the wind",
        Medium, High, ["Cardio", "Challenge", "Achievement"], indoor = false),
];

impl Row {
    fn to_activity(&self) -> Activity {
        Activity {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            duration: self.duration,
            impact: self.impact,
            benefits: self.benefits.iter().map(|b| b.to_string()).collect(),
            indoor: self.indoor,
        }
    }
}

/// Activities keyed by mood id, then weather id.
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    entries: HashMap<String, HashMap<String, Vec<Activity>>>,
}

impl ActivityCatalog {
    /// The catalog shipped with the app.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|row| {
            (
                row.mood.to_string(),
                row.weather.to_string(),
                row.to_activity(),
            )
        }))
    }

    /// Build a catalog from `(mood_id, weather_id, activity)` triples. Activities keep
    /// the order they are given in.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, Activity)>,
    {
        let mut catalog = Self::default();
        for (mood, weather, activity) in entries {
            catalog
                .entries
                .entry(mood)
                .or_default()
                .entry(weather)
                .or_default()
                .push(activity);
        }
        catalog
    }

    /// Activities for the pair, optionally limited to one duration. Unknown pairs and
    /// filters that match nothing both yield an empty list.
    pub fn suggestions_for(
        &self,
        mood_id: &str,
        weather_id: &str,
        duration_filter: Option<ActivityDuration>,
    ) -> Vec<Activity> {
        self.entries
            .get(mood_id)
            .and_then(|by_weather| by_weather.get(weather_id))
            .map(|activities| {
                activities
                    .iter()
                    .filter(|activity| duration_filter.map_or(true, |d| activity.duration == d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(|by_weather| by_weather.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn builtin_lookup_keeps_catalog_order() {
        let catalog = ActivityCatalog::builtin();
        let sunny = catalog.suggestions_for("happy", "sunny", None);
        assert_eq!(ids(&sunny), vec!["nature_walk", "picnic", "photography_walk"]);
        assert_eq!(sunny[0].benefits, vec!["Exercise", "Fresh air", "Nature connection"]);
        assert!(!sunny[0].indoor);
    }

    #[test]
    fn duration_filter_narrows_results() {
        let catalog = ActivityCatalog::builtin();
        let quick = catalog.suggestions_for("happy", "cloudy", Some(ActivityDuration::Quick));
        assert_eq!(ids(&quick), vec!["dance_party"]);

        let long = catalog.suggestions_for("happy", "cloudy", Some(ActivityDuration::Long));
        assert!(long.is_empty());
    }

    #[test]
    fn missing_pairs_return_empty() {
        let catalog = ActivityCatalog::builtin();
        assert!(catalog.suggestions_for("sad", "windy", None).is_empty());
        assert!(catalog.suggestions_for("happy", "snowy", None).is_empty());

        let without_windy = ActivityCatalog::from_entries(
            BUILTIN
                .iter()
                .filter(|row| row.weather != "windy")
                .map(|row| (row.mood.to_string(), row.weather.to_string(), row.to_activity())),
        );
        assert!(without_windy.suggestions_for("happy", "windy", None).is_empty());
        assert_eq!(without_windy.suggestions_for("happy", "sunny", None).len(), 3);
    }

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = ActivityCatalog::builtin();
        let unique: HashSet<_> = BUILTIN.iter().map(|row| row.id).collect();
        assert_eq!(unique.len(), BUILTIN.len());
        assert_eq!(catalog.len(), BUILTIN.len());
        assert!(!catalog.is_empty());
    }
}
