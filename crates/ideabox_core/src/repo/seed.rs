//! Bundled sample ideas written on first access to empty storage.

use crate::model::idea::Idea;
use crate::storage::{StorageError, StorageResult};

const SAMPLE_IDEAS_JSON: &str = include_str!("../../seed/sample_ideas.json");

/// Number of bundled sample ideas.
pub const SAMPLE_IDEA_COUNT: usize = 5;

/// Decodes the bundled sample collection.
pub fn sample_ideas() -> StorageResult<Vec<Idea>> {
    serde_json::from_str(SAMPLE_IDEAS_JSON).map_err(|err| StorageError::Corrupt {
        key: "<bundled seed>".to_string(),
        message: err.to_string(),
    })
}
