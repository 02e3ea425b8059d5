//! Core domain logic for the Schola student planner.
//! This crate owns the planner records, their invariants and their storage.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{open_planner, ConfigError, PlannerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::day_note::{DayNote, Mood};
pub use model::grade::{Grade, GradeKind, NewGrade, DEFAULT_GRADE_WEIGHT};
pub use model::homework::{Homework, HomeworkKind, NewHomework, Priority};
pub use model::snapshot::PlannerSnapshot;
pub use model::subject::{NewSubject, Subject};
pub use model::timetable::{NewTimetableEntry, TimetableEntry};
pub use model::{RecordId, ValidationError};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, DEFAULT_STORAGE_KEY,
};
pub use service::agenda::{
    day_agenda, due_label, homework_due_on, homework_with_status, is_overdue, overdue_homework,
    timetable_for_day, DayAgenda, DueLabel, HomeworkFilter,
};
pub use service::grade_stats::{
    overall_average, recent_grades, subject_average, subject_averages, weighted_average,
    SubjectAverage,
};
pub use service::planner_store::PlannerStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
