//! Homework and study tasks attached to a subject.

use super::{new_record_id, require_date, require_text, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Task urgency shown next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Distinguishes assignments from self-study slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkKind {
    #[default]
    Homework,
    Study,
}

/// One homework item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: RecordId,
    pub subject_id: RecordId,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub due_date: String,
    pub is_done: bool,
    pub priority: Priority,
    /// Serialized as `type` to match the persisted blob.
    #[serde(rename = "type")]
    pub kind: HomeworkKind,
}

/// Creation payload for [`Homework`]. New items always start open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHomework {
    pub subject_id: RecordId,
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub kind: HomeworkKind,
}

impl NewHomework {
    /// Medium-priority homework for `subject_id` due on `due_date`.
    pub fn new(
        subject_id: impl Into<RecordId>,
        title: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            title: title.into(),
            due_date: due_date.into(),
            priority: Priority::default(),
            kind: HomeworkKind::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_kind(mut self, kind: HomeworkKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("subjectId", &self.subject_id)?;
        require_text("title", &self.title)?;
        require_date("dueDate", &self.due_date)
    }

    pub(crate) fn into_record(self) -> Homework {
        Homework {
            id: new_record_id(),
            subject_id: self.subject_id,
            title: self.title,
            due_date: self.due_date,
            is_done: false,
            priority: self.priority,
            kind: self.kind,
        }
    }
}
