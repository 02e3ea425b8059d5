//! Subject records: the parent of homework, grades and timetable entries.

use super::{new_record_id, require_text, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// A school subject.
///
/// `color` is a presentation token (`blue`, `orange`, ...) and is stored
/// as-is without checking it against a fixed palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: RecordId,
    pub name: String,
    pub color: String,
    pub teacher: String,
    pub room: String,
}

/// Creation payload for [`Subject`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSubject {
    pub name: String,
    pub color: String,
    pub teacher: String,
    pub room: String,
}

impl NewSubject {
    /// Payload with the given name and the default `blue` color.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: "blue".to_string(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }

    pub(crate) fn into_record(self) -> Subject {
        Subject {
            id: new_record_id(),
            name: self.name,
            color: self.color,
            teacher: self.teacher,
            room: self.room,
        }
    }
}
