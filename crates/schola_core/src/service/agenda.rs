//! Day-scoped and list views over a snapshot.
//!
//! # Invariants
//! - Timetable views are ordered by start time; `HH:MM` zero padding makes
//!   string order equal to clock order.
//! - "Overdue" means strictly before today. Items due today are never overdue.

use crate::calendar::{day_of_week, format_date, parse_date};
use crate::model::day_note::DayNote;
use crate::model::homework::Homework;
use crate::model::snapshot::PlannerSnapshot;
use crate::model::timetable::TimetableEntry;
use chrono::NaiveDate;

/// Which side of the task list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkFilter {
    Todo,
    Done,
}

/// How a due date is presented relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    On(NaiveDate),
}

/// Everything the diary shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda<'a> {
    pub date: NaiveDate,
    /// Classes on this weekday, earliest first.
    pub timetable: Vec<&'a TimetableEntry>,
    /// Homework due on this exact date, in insertion order.
    pub homework: Vec<&'a Homework>,
    pub note: Option<&'a DayNote>,
}

/// Homework due on `date` (`YYYY-MM-DD`), in insertion order.
pub fn homework_due_on<'a>(snapshot: &'a PlannerSnapshot, date: &str) -> Vec<&'a Homework> {
    snapshot
        .homework
        .iter()
        .filter(|item| item.due_date == date)
        .collect()
}

/// Timetable entries for `day_of_week`, sorted by start time.
pub fn timetable_for_day(snapshot: &PlannerSnapshot, day_of_week: u8) -> Vec<&TimetableEntry> {
    let mut entries: Vec<&TimetableEntry> = snapshot
        .timetable
        .iter()
        .filter(|entry| entry.day_of_week == day_of_week)
        .collect();
    entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    entries
}

/// Open items whose due date lies strictly before `today`.
///
/// An unparseable due date is never overdue.
pub fn is_overdue(item: &Homework, today: NaiveDate) -> bool {
    !item.is_done && parse_date(&item.due_date).is_some_and(|due| due < today)
}

pub fn overdue_homework(snapshot: &PlannerSnapshot, today: NaiveDate) -> Vec<&Homework> {
    snapshot
        .homework
        .iter()
        .filter(|item| is_overdue(item, today))
        .collect()
}

/// Open or completed homework, earliest due date first.
pub fn homework_with_status(snapshot: &PlannerSnapshot, filter: HomeworkFilter) -> Vec<&Homework> {
    let want_done = filter == HomeworkFilter::Done;
    let mut items: Vec<&Homework> = snapshot
        .homework
        .iter()
        .filter(|item| item.is_done == want_done)
        .collect();
    items.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    items
}

pub fn due_label(item: &Homework, today: NaiveDate) -> Option<DueLabel> {
    let due = parse_date(&item.due_date)?;
    if due == today {
        Some(DueLabel::Today)
    } else {
        Some(DueLabel::On(due))
    }
}

/// Diary bundle for `date`: its weekday's classes, due homework and note.
pub fn day_agenda(snapshot: &PlannerSnapshot, date: NaiveDate) -> DayAgenda<'_> {
    let key = format_date(date);
    DayAgenda {
        date,
        timetable: timetable_for_day(snapshot, day_of_week(date)),
        homework: homework_due_on(snapshot, &key),
        note: snapshot.note_for(&key),
    }
}
