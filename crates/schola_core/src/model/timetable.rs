//! Weekly timetable slots.
//!
//! Overlapping slots on the same day are accepted; nothing here checks
//! entries against each other.

use super::{new_record_id, require_text, RecordId, ValidationError};
use crate::calendar::is_clock_time;
use serde::{Deserialize, Serialize};

/// One recurring class slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: RecordId,
    pub subject_id: RecordId,
    /// Sunday = 0 ... Saturday = 6.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// Creation payload for [`TimetableEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimetableEntry {
    pub subject_id: RecordId,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl NewTimetableEntry {
    pub fn new(
        subject_id: impl Into<RecordId>,
        day_of_week: u8,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("subjectId", &self.subject_id)?;
        if self.day_of_week > 6 {
            return Err(ValidationError::InvalidDayOfWeek(self.day_of_week));
        }
        for (field, value) in [("startTime", &self.start_time), ("endTime", &self.end_time)] {
            if !is_clock_time(value) {
                return Err(ValidationError::InvalidTime {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.start_time >= self.end_time {
            return Err(ValidationError::TimeRangeNotIncreasing {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn into_record(self) -> TimetableEntry {
        TimetableEntry {
            id: new_record_id(),
            subject_id: self.subject_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}
