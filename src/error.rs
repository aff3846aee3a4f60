//! Error taxonomy for the mood history core.
//!
//! Infrastructure code (database worker, migrations, settings file) works in
//! `anyhow::Result`; everything crossing the public API is converted into these types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown or missing mood '{0}'")]
    InvalidMood(String),

    #[error("note is {len} characters long (max {max})")]
    NoteTooLong { len: usize, max: usize },

    #[error("an entry with id {0} already exists")]
    DuplicateEntry(String),

    #[error("unknown weather '{0}'")]
    UnknownWeather(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("stored mood history is corrupt: {0}")]
    CorruptData(String),

    #[error("failed to write mood history: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no mood entry with id {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl MoodError {
    pub fn not_found(id: impl Into<String>) -> Self {
        MoodError::NotFound { id: id.into() }
    }
}

pub type MoodResult<T> = Result<T, MoodError>;
