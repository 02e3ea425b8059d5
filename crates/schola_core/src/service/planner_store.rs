//! Planner store: owner of the in-memory snapshot and its mutations.
//!
//! # Responsibility
//! - Load the snapshot once at construction, falling back to seed state.
//! - Apply validated mutations and mirror the result to the repository.
//!
//! # Invariants
//! - Validation runs before any change, so a rejected call leaves the
//!   snapshot untouched.
//! - A failed save never undoes or fails the in-memory mutation.
//! - At most one note exists per date.
//! - Deletes and toggles act on every record carrying the id, including
//!   duplicates loaded from older blobs.
//! - Deleting a subject removes every homework, grade and timetable row
//!   that references it. Notes are keyed by date and stay.

use crate::model::day_note::{DayNote, Mood};
use crate::model::grade::{Grade, NewGrade};
use crate::model::homework::{Homework, NewHomework};
use crate::model::snapshot::PlannerSnapshot;
use crate::model::subject::{NewSubject, Subject};
use crate::model::timetable::{NewTimetableEntry, TimetableEntry};
use crate::model::{new_record_id, require_date, RecordId, ValidationError};
use crate::repo::snapshot_repo::SnapshotRepository;
use log::{debug, error, info, warn};

/// Session-long owner of all planner records.
pub struct PlannerStore<R: SnapshotRepository> {
    repo: R,
    snapshot: PlannerSnapshot,
    last_persistence_error: Option<String>,
}

impl<R: SnapshotRepository> PlannerStore<R> {
    /// Loads the persisted snapshot, or seed state when there is none.
    ///
    /// Unreadable or unparseable storage is logged and treated as empty;
    /// construction itself never fails.
    pub fn open(repo: R) -> Self {
        let snapshot = match repo.load_snapshot() {
            Ok(Some(snapshot)) => {
                info!(
                    "event=store_load module=store status=ok source=persisted subjects={} homework={} grades={} timetable={} notes={}",
                    snapshot.subjects.len(),
                    snapshot.homework.len(),
                    snapshot.grades.len(),
                    snapshot.timetable.len(),
                    snapshot.notes.len()
                );
                snapshot
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok source=seed reason=absent");
                PlannerSnapshot::seed()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error source=seed error_code=load_failed error={err}"
                );
                PlannerSnapshot::seed()
            }
        };

        Self {
            repo,
            snapshot,
            last_persistence_error: None,
        }
    }

    pub fn snapshot(&self) -> &PlannerSnapshot {
        &self.snapshot
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.snapshot.subjects
    }

    pub fn homework(&self) -> &[Homework] {
        &self.snapshot.homework
    }

    pub fn grades(&self) -> &[Grade] {
        &self.snapshot.grades
    }

    pub fn timetable(&self) -> &[TimetableEntry] {
        &self.snapshot.timetable
    }

    pub fn notes(&self) -> &[DayNote] {
        &self.snapshot.notes
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.snapshot.subject(id)
    }

    pub fn note_for(&self, date: &str) -> Option<&DayNote> {
        self.snapshot.note_for(date)
    }

    /// Message of the most recent failed save or clear.
    ///
    /// Cleared again by the next successful write.
    pub fn last_persistence_error(&self) -> Option<&str> {
        self.last_persistence_error.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Gives the repository back, dropping the in-memory snapshot.
    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn add_subject(&mut self, data: NewSubject) -> Result<RecordId, ValidationError> {
        data.validate().map_err(|err| rejected("subject_add", err))?;

        let subject = data.into_record();
        let id = subject.id.clone();
        self.snapshot.subjects.push(subject);
        debug!("event=subject_add module=store status=ok id={id}");
        self.persist("subject_add");
        Ok(id)
    }

    /// Deletes a subject together with its homework, grades and timetable.
    ///
    /// Every subject carrying `id` goes, since older blobs may hold
    /// duplicate ids. Returns `false` (and changes nothing) when the id is
    /// unknown.
    pub fn delete_subject(&mut self, id: &str) -> bool {
        if remove_matching(&mut self.snapshot.subjects, |subject| subject.id == id) == 0 {
            debug!("event=subject_delete module=store status=noop reason=not_found");
            return false;
        }

        let before = self.snapshot.dependent_count(id);
        self.snapshot.homework.retain(|item| item.subject_id != id);
        self.snapshot.grades.retain(|grade| grade.subject_id != id);
        self.snapshot.timetable.retain(|entry| entry.subject_id != id);
        debug!("event=subject_delete module=store status=ok id={id} cascaded={before}");
        self.persist("subject_delete");
        true
    }

    pub fn add_homework(&mut self, data: NewHomework) -> Result<RecordId, ValidationError> {
        data.validate()
            .and_then(|()| self.require_subject(&data.subject_id))
            .map_err(|err| rejected("homework_add", err))?;

        let item = data.into_record();
        let id = item.id.clone();
        self.snapshot.homework.push(item);
        debug!("event=homework_add module=store status=ok id={id}");
        self.persist("homework_add");
        Ok(id)
    }

    /// Flips the completion flag of every item carrying `id`.
    ///
    /// Returns `false` when the id is unknown.
    pub fn toggle_homework(&mut self, id: &str) -> bool {
        let mut toggled = 0;
        for item in self.snapshot.homework.iter_mut().filter(|item| item.id == id) {
            item.is_done = !item.is_done;
            toggled += 1;
        }
        if toggled == 0 {
            debug!("event=homework_toggle module=store status=noop reason=not_found");
            return false;
        }

        debug!("event=homework_toggle module=store status=ok id={id} count={toggled}");
        self.persist("homework_toggle");
        true
    }

    pub fn delete_homework(&mut self, id: &str) -> bool {
        let removed = remove_matching(&mut self.snapshot.homework, |item| item.id == id);
        self.after_delete("homework_delete", removed)
    }

    pub fn add_grade(&mut self, data: NewGrade) -> Result<RecordId, ValidationError> {
        data.validate()
            .and_then(|()| self.require_subject(&data.subject_id))
            .map_err(|err| rejected("grade_add", err))?;

        let grade = data.into_record();
        let id = grade.id.clone();
        self.snapshot.grades.push(grade);
        debug!("event=grade_add module=store status=ok id={id}");
        self.persist("grade_add");
        Ok(id)
    }

    pub fn delete_grade(&mut self, id: &str) -> bool {
        let removed = remove_matching(&mut self.snapshot.grades, |grade| grade.id == id);
        self.after_delete("grade_delete", removed)
    }

    /// Adds a class slot. Overlapping slots are accepted as-is.
    pub fn add_timetable_entry(
        &mut self,
        data: NewTimetableEntry,
    ) -> Result<RecordId, ValidationError> {
        data.validate()
            .and_then(|()| self.require_subject(&data.subject_id))
            .map_err(|err| rejected("timetable_add", err))?;

        let entry = data.into_record();
        let id = entry.id.clone();
        self.snapshot.timetable.push(entry);
        debug!("event=timetable_add module=store status=ok id={id}");
        self.persist("timetable_add");
        Ok(id)
    }

    pub fn delete_timetable_entry(&mut self, id: &str) -> bool {
        let removed = remove_matching(&mut self.snapshot.timetable, |entry| entry.id == id);
        self.after_delete("timetable_delete", removed)
    }

    /// Creates or updates the diary note for `date`.
    ///
    /// `mood = None` keeps whatever mood the note already has.
    /// Returns the id of the note that now holds `content`.
    pub fn update_note(
        &mut self,
        date: &str,
        content: impl Into<String>,
        mood: Option<Mood>,
    ) -> Result<RecordId, ValidationError> {
        require_date("date", date).map_err(|err| rejected("note_update", err))?;
        let content = content.into();

        let id = match self.snapshot.notes.iter_mut().find(|note| note.date == date) {
            Some(note) => {
                note.content = content;
                if mood.is_some() {
                    note.mood = mood;
                }
                debug!("event=note_update module=store status=ok mode=update id={}", note.id);
                note.id.clone()
            }
            None => {
                let note = DayNote {
                    id: new_record_id(),
                    date: date.to_string(),
                    content,
                    mood,
                };
                let id = note.id.clone();
                self.snapshot.notes.push(note);
                debug!("event=note_update module=store status=ok mode=create id={id}");
                id
            }
        };

        self.persist("note_update");
        Ok(id)
    }

    /// Replaces everything with seed state and removes the persisted blob.
    ///
    /// Callers are expected to confirm with the user first.
    pub fn reset_data(&mut self) {
        self.snapshot = PlannerSnapshot::seed();
        match self.repo.clear_snapshot() {
            Ok(()) => {
                self.last_persistence_error = None;
                info!("event=store_reset module=store status=ok");
            }
            Err(err) => {
                error!("event=store_reset module=store status=error error_code=clear_failed error={err}");
                self.last_persistence_error = Some(err.to_string());
            }
        }
    }

    fn require_subject(&self, subject_id: &str) -> Result<(), ValidationError> {
        if self.snapshot.has_subject(subject_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownSubject(subject_id.to_string()))
        }
    }

    fn after_delete(&mut self, event: &'static str, removed: usize) -> bool {
        if removed == 0 {
            debug!("event={event} module=store status=noop reason=not_found");
            return false;
        }
        debug!("event={event} module=store status=ok count={removed}");
        self.persist(event);
        true
    }

    fn persist(&mut self, trigger: &'static str) {
        match self.repo.save_snapshot(&self.snapshot) {
            Ok(()) => self.last_persistence_error = None,
            Err(err) => {
                error!(
                    "event=snapshot_save module=store status=error trigger={trigger} error_code=save_failed error={err}"
                );
                self.last_persistence_error = Some(err.to_string());
            }
        }
    }
}

fn rejected(event: &'static str, err: ValidationError) -> ValidationError {
    debug!("event={event} module=store status=rejected reason={err}");
    err
}

/// Drops every item for which `matches` holds and returns how many went.
fn remove_matching<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !matches(item));
    before - items.len()
}
