pub mod mood_log;

pub use mood_log::{LoadStatus, MoodLog};
