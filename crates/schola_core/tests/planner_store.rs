use schola_core::{
    Mood, NewGrade, NewHomework, NewSubject, NewTimetableEntry, PlannerSnapshot, PlannerStore,
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, ValidationError,
};
use std::collections::HashSet;

fn memory_store() -> PlannerStore<SqliteSnapshotRepository> {
    PlannerStore::open(SqliteSnapshotRepository::open_in_memory().unwrap())
}

/// Storage that accepts reads but fails every write.
struct ReadOnlyRepository {
    stored: Option<PlannerSnapshot>,
    write_attempts: usize,
}

impl SnapshotRepository for ReadOnlyRepository {
    fn load_snapshot(&self) -> RepoResult<Option<PlannerSnapshot>> {
        Ok(self.stored.clone())
    }

    fn save_snapshot(&mut self, _snapshot: &PlannerSnapshot) -> RepoResult<()> {
        self.write_attempts += 1;
        Err(RepoError::Db(schola_core::db::DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )))
    }

    fn clear_snapshot(&mut self) -> RepoResult<()> {
        self.write_attempts += 1;
        Err(RepoError::MissingRequiredTable("kv_store"))
    }
}

#[test]
fn fresh_store_starts_from_seed_state() {
    let store = memory_store();
    assert_eq!(store.snapshot(), &PlannerSnapshot::seed());
    assert!(store.last_persistence_error().is_none());
}

#[test]
fn add_subject_appends_and_persists() {
    let mut store = memory_store();
    let id = store
        .add_subject(NewSubject::named("Biology").with_color("green"))
        .unwrap();

    assert_eq!(store.subjects().len(), 4);
    assert_eq!(store.subjects().last().unwrap().id, id);
    let persisted = store.repository().load_snapshot().unwrap().unwrap();
    assert_eq!(&persisted, store.snapshot());
}

#[test]
fn add_subject_rejects_blank_name_without_changes() {
    let mut store = memory_store();
    let err = store.add_subject(NewSubject::named("   ")).unwrap_err();

    assert_eq!(err, ValidationError::EmptyField("name"));
    assert_eq!(store.snapshot(), &PlannerSnapshot::seed());
    assert!(store.repository().load_snapshot().unwrap().is_none());
}

#[test]
fn add_homework_starts_open_and_requires_existing_subject() {
    let mut store = memory_store();
    let id = store
        .add_homework(NewHomework::new("1", "Algebra p. 42", "2024-04-10"))
        .unwrap();
    let item = store.homework().iter().find(|item| item.id == id).unwrap();
    assert!(!item.is_done);

    let err = store
        .add_homework(NewHomework::new("missing", "Essay", "2024-04-10"))
        .unwrap_err();
    assert_eq!(err, ValidationError::UnknownSubject("missing".to_string()));
    assert_eq!(store.homework().len(), 1);
}

#[test]
fn toggle_homework_twice_restores_original_state() {
    let mut store = memory_store();
    let id = store
        .add_homework(NewHomework::new("2", "Read chapter 3", "2024-04-11"))
        .unwrap();

    assert!(store.toggle_homework(&id));
    assert!(store.homework()[0].is_done);
    assert!(store.toggle_homework(&id));
    assert!(!store.homework()[0].is_done);
}

#[test]
fn unknown_ids_are_soft_noops() {
    let mut store = memory_store();
    store
        .add_homework(NewHomework::new("1", "Worksheet", "2024-04-10"))
        .unwrap();
    let before = store.snapshot().clone();

    assert!(!store.toggle_homework("nope"));
    assert!(!store.delete_homework("nope"));
    assert!(!store.delete_grade("nope"));
    assert!(!store.delete_timetable_entry("nope"));
    assert!(!store.delete_subject("nope"));
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn delete_removes_only_the_target_record() {
    let mut store = memory_store();
    let keep = store
        .add_homework(NewHomework::new("1", "Keep", "2024-04-10"))
        .unwrap();
    let drop_id = store
        .add_homework(NewHomework::new("1", "Drop", "2024-04-10"))
        .unwrap();
    let grade = store
        .add_grade(NewGrade::new("1", 7.0, 10.0, "2024-04-01"))
        .unwrap();
    let slot = store
        .add_timetable_entry(NewTimetableEntry::new("1", 1, "08:00", "08:45"))
        .unwrap();

    assert!(store.delete_homework(&drop_id));
    assert!(store.delete_grade(&grade));
    assert!(store.delete_timetable_entry(&slot));

    assert_eq!(store.homework().len(), 1);
    assert_eq!(store.homework()[0].id, keep);
    assert!(store.grades().is_empty());
    assert!(store.timetable().is_empty());
}

#[test]
fn delete_subject_cascades_and_leaves_other_subjects_untouched() {
    let mut store = memory_store();
    for subject in ["1", "2"] {
        store
            .add_homework(NewHomework::new(subject, "Task", "2024-04-10"))
            .unwrap();
        store
            .add_grade(NewGrade::new(subject, 8.0, 10.0, "2024-04-01"))
            .unwrap();
        store
            .add_timetable_entry(NewTimetableEntry::new(subject, 3, "09:00", "10:00"))
            .unwrap();
    }
    store.update_note("2024-04-10", "Busy", None).unwrap();
    let history_rows = store.snapshot().dependent_count("2");

    assert!(store.delete_subject("1"));

    let snapshot = store.snapshot();
    assert!(snapshot.subject("1").is_none());
    assert_eq!(snapshot.dependent_count("1"), 0);
    assert_eq!(snapshot.dependent_count("2"), history_rows);
    assert_eq!(snapshot.subjects.len(), 2);
    assert_eq!(snapshot.notes.len(), 1);

    let persisted = store.repository().load_snapshot().unwrap().unwrap();
    assert_eq!(persisted.dependent_count("1"), 0);
}

#[test]
fn add_grade_validates_numbers_and_subject() {
    let mut store = memory_store();
    let err = store
        .add_grade(NewGrade::new("1", 8.0, 0.0, "2024-04-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NonPositiveNumber { field: "max", .. }
    ));

    let err = store
        .add_grade(NewGrade::new("42", 8.0, 10.0, "2024-04-01"))
        .unwrap_err();
    assert_eq!(err, ValidationError::UnknownSubject("42".to_string()));

    store
        .add_grade(NewGrade::new("1", 8.0, 10.0, "2024-04-01"))
        .unwrap();
    assert_eq!(store.grades()[0].weight, 1.0);
}

#[test]
fn timetable_accepts_overlapping_slots_but_rejects_bad_ranges() {
    let mut store = memory_store();
    store
        .add_timetable_entry(NewTimetableEntry::new("1", 1, "08:00", "09:30"))
        .unwrap();
    store
        .add_timetable_entry(NewTimetableEntry::new("1", 1, "09:00", "10:00"))
        .unwrap();
    assert_eq!(store.timetable().len(), 2);

    let err = store
        .add_timetable_entry(NewTimetableEntry::new("1", 1, "10:00", "09:00"))
        .unwrap_err();
    assert!(matches!(err, ValidationError::TimeRangeNotIncreasing { .. }));
    assert_eq!(store.timetable().len(), 2);
}

#[test]
fn update_note_upserts_and_preserves_mood_when_omitted() {
    let mut store = memory_store();
    let first = store
        .update_note("2024-04-10", "a", Some(Mood::Happy))
        .unwrap();
    let second = store.update_note("2024-04-10", "b", None).unwrap();

    assert_eq!(first, second);
    let notes: Vec<_> = store
        .notes()
        .iter()
        .filter(|note| note.date == "2024-04-10")
        .collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "b");
    assert_eq!(notes[0].mood, Some(Mood::Happy));

    store
        .update_note("2024-04-10", "b", Some(Mood::Stressed))
        .unwrap();
    assert_eq!(
        store.note_for("2024-04-10").unwrap().mood,
        Some(Mood::Stressed)
    );
}

#[test]
fn update_note_keeps_one_note_per_date_across_days() {
    let mut store = memory_store();
    store.update_note("2024-04-10", "first day", None).unwrap();
    store.update_note("2024-04-11", "second day", None).unwrap();
    store.update_note("2024-04-10", "edited", None).unwrap();

    assert_eq!(store.notes().len(), 2);
    assert_eq!(store.note_for("2024-04-10").unwrap().content, "edited");

    let err = store.update_note("10/04/2024", "x", None).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDate { field: "date", .. }));
}

#[test]
fn rapid_homework_creation_yields_distinct_ids() {
    let mut store = memory_store();
    let ids: HashSet<_> = (0..100)
        .map(|index| {
            store
                .add_homework(NewHomework::new("1", format!("Task {index}"), "2024-04-10"))
                .unwrap()
        })
        .collect();

    assert_eq!(ids.len(), 100);
    assert_eq!(store.homework().len(), 100);
}

#[test]
fn reset_restores_seed_and_clears_storage() {
    let mut store = memory_store();
    store.add_subject(NewSubject::named("Art")).unwrap();
    store.update_note("2024-04-10", "note", None).unwrap();
    assert!(store.repository().load_snapshot().unwrap().is_some());

    store.reset_data();

    assert_eq!(store.snapshot(), &PlannerSnapshot::seed());
    assert!(store.repository().load_snapshot().unwrap().is_none());

    let reopened = PlannerStore::open(store.into_repository());
    assert_eq!(reopened.snapshot(), &PlannerSnapshot::seed());
}

#[test]
fn failed_writes_keep_in_memory_changes_and_record_the_error() {
    let mut store = PlannerStore::open(ReadOnlyRepository {
        stored: None,
        write_attempts: 0,
    });

    let id = store.add_subject(NewSubject::named("Music")).unwrap();
    assert!(store.subject(&id).is_some());
    assert!(store.last_persistence_error().is_some());

    store.reset_data();
    assert_eq!(store.snapshot(), &PlannerSnapshot::seed());
    assert!(store
        .last_persistence_error()
        .unwrap()
        .contains("kv_store"));
    assert_eq!(store.repository().write_attempts, 2);
}

#[test]
fn store_prefers_persisted_state_over_seed() {
    let mut stored = PlannerSnapshot::seed();
    stored.subjects.truncate(1);
    let store = PlannerStore::open(ReadOnlyRepository {
        stored: Some(stored.clone()),
        write_attempts: 0,
    });

    assert_eq!(store.snapshot(), &stored);
}

#[test]
fn duplicate_ids_from_older_blobs_are_removed_and_toggled_together() {
    let mut repo = SqliteSnapshotRepository::open_in_memory().unwrap();
    repo.write_raw_value(
        r#"{
            "subjects": [
                {"id": "1712000000000", "name": "Art", "color": "red", "teacher": "", "room": ""},
                {"id": "1712000000000", "name": "Art", "color": "red", "teacher": "", "room": ""},
                {"id": "2", "name": "History", "color": "orange", "teacher": "", "room": ""}
            ],
            "homework": [
                {"id": "1712000000005", "subjectId": "2", "title": "Essay", "dueDate": "2024-04-02", "isDone": false, "priority": "medium", "type": "homework"},
                {"id": "1712000000005", "subjectId": "2", "title": "Essay", "dueDate": "2024-04-02", "isDone": false, "priority": "medium", "type": "homework"},
                {"id": "1712000000006", "subjectId": "2", "title": "Map", "dueDate": "2024-04-03", "isDone": false, "priority": "low", "type": "study"},
                {"id": "1712000000007", "subjectId": "1712000000000", "title": "Sketch", "dueDate": "2024-04-03", "isDone": false, "priority": "low", "type": "homework"}
            ],
            "grades": [],
            "timetable": [],
            "notes": []
        }"#,
    )
    .unwrap();
    let mut store = PlannerStore::open(repo);

    assert!(store.toggle_homework("1712000000005"));
    assert!(store
        .homework()
        .iter()
        .filter(|item| item.id == "1712000000005")
        .all(|item| item.is_done));

    assert!(store.delete_homework("1712000000005"));
    assert!(store.homework().iter().all(|item| item.id != "1712000000005"));

    assert!(store.delete_subject("1712000000000"));
    assert!(store.subject("1712000000000").is_none());
    assert_eq!(store.subjects().len(), 1);
    let titles: Vec<_> = store.homework().iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["Map"]);
}
