//! Planner domain model.
//!
//! # Responsibility
//! - Define the five record kinds owned by the planner store.
//! - Define creation payloads and their structural validation.
//! - Define the aggregate snapshot and its seed state.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its collection.
//! - Payload validation never depends on other records; reference checks
//!   (does the subject exist?) belong to the store.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod day_note;
pub mod grade;
pub mod homework;
pub mod snapshot;
pub mod subject;
pub mod timetable;

/// Identifier of any planner record.
///
/// Seed rows use short numeric strings, generated rows use UUID v4 text.
pub type RecordId = String;

/// Generates a fresh record id.
///
/// UUID v4 keeps ids distinct even for records created within the same clock
/// tick.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Rejection reasons for structurally invalid caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is blank after trim.
    EmptyField(&'static str),
    /// The referenced subject does not exist in the store.
    UnknownSubject(RecordId),
    /// A date field is not a real `YYYY-MM-DD` calendar day.
    InvalidDate { field: &'static str, value: String },
    /// A time field is not a zero-padded `HH:MM` value.
    InvalidTime { field: &'static str, value: String },
    /// Day-of-week outside `0..=6`.
    InvalidDayOfWeek(u8),
    /// Timetable end time is not after its start time.
    TimeRangeNotIncreasing { start: String, end: String },
    /// A numeric field that must be finite and strictly positive.
    NonPositiveNumber { field: &'static str, value: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::UnknownSubject(id) => write!(f, "subject not found: {id}"),
            Self::InvalidDate { field, value } => {
                write!(f, "`{field}` must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::InvalidTime { field, value } => {
                write!(f, "`{field}` must be a HH:MM time, got `{value}`")
            }
            Self::InvalidDayOfWeek(day) => {
                write!(f, "day of week must be in 0..=6, got {day}")
            }
            Self::TimeRangeNotIncreasing { start, end } => {
                write!(f, "end time `{end}` must be after start time `{start}`")
            }
            Self::NonPositiveNumber { field, value } => {
                write!(f, "`{field}` must be a positive number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if crate::calendar::parse_date(value).is_none() {
        return Err(ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NonPositiveNumber { field, value });
    }
    Ok(())
}
