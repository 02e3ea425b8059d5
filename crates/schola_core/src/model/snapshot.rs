//! Aggregate snapshot of all planner records.
//!
//! # Invariants
//! - Collections keep insertion order; there are no secondary indices.
//! - The serialized form is the persisted blob shape (camelCase keys).
//! - Loading is per record: an entry that cannot be read is skipped with a
//!   warning instead of failing the whole snapshot.

use super::day_note::DayNote;
use super::grade::Grade;
use super::homework::Homework;
use super::subject::Subject;
use super::timetable::TimetableEntry;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Everything the planner knows, at one point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    #[serde(deserialize_with = "readable_records")]
    pub subjects: Vec<Subject>,
    #[serde(deserialize_with = "readable_records")]
    pub homework: Vec<Homework>,
    #[serde(deserialize_with = "readable_records")]
    pub grades: Vec<Grade>,
    #[serde(deserialize_with = "readable_records")]
    pub timetable: Vec<TimetableEntry>,
    #[serde(deserialize_with = "readable_records")]
    pub notes: Vec<DayNote>,
}

/// Reads a record array, dropping entries that do not fit `T`.
///
/// Older app versions stored cleared number inputs as `null`.
fn readable_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let total = entries.len();
    let records: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "event=snapshot_record_skip module=model status=skipped record={} index={index} error={err}",
                    std::any::type_name::<T>()
                );
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(
            "event=snapshot_load module=model status=partial record={} kept={} skipped={}",
            std::any::type_name::<T>(),
            records.len(),
            total - records.len()
        );
    }
    Ok(records)
}

impl PlannerSnapshot {
    /// First-run state: three starter subjects and nothing else.
    pub fn seed() -> Self {
        let subject = |id: &str, name: &str, color: &str, teacher: &str, room: &str| Subject {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            teacher: teacher.to_string(),
            room: room.to_string(),
        };

        Self {
            subjects: vec![
                subject("1", "Mathematics", "blue", "Mr. Smith", "101"),
                subject("2", "History", "orange", "Mrs. Jones", "204"),
                subject("3", "Physics", "purple", "Dr. Brown", "LAB-1"),
            ],
            ..Self::default()
        }
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn has_subject(&self, id: &str) -> bool {
        self.subject(id).is_some()
    }

    /// The diary note for `date`, if one was written.
    pub fn note_for(&self, date: &str) -> Option<&DayNote> {
        self.notes.iter().find(|note| note.date == date)
    }

    /// Number of homework, grade and timetable rows pointing at `subject_id`.
    pub fn dependent_count(&self, subject_id: &str) -> usize {
        self.homework
            .iter()
            .filter(|item| item.subject_id == subject_id)
            .count()
            + self
                .grades
                .iter()
                .filter(|grade| grade.subject_id == subject_id)
                .count()
            + self
                .timetable
                .iter()
                .filter(|entry| entry.subject_id == subject_id)
                .count()
    }
}
