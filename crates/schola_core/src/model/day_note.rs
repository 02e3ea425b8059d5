//! Diary notes, at most one per calendar day.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// How the day felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Stressed,
    Tired,
}

/// Free-text diary entry for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayNote {
    pub id: RecordId,
    /// `YYYY-MM-DD`; the natural key of the note.
    pub date: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}
