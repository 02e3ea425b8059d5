use schola_core::{
    logging_status, open_planner, ConfigError, NewHomework, PlannerConfig, PlannerSnapshot,
};

#[test]
fn open_planner_creates_data_dir_and_persists_between_sessions() {
    let root = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(root.path().join("nested").join("data"));

    let homework_id = {
        let mut store = open_planner(&config).unwrap();
        assert_eq!(store.snapshot(), &PlannerSnapshot::seed());
        store
            .add_homework(NewHomework::new("3", "Lab sheet", "2024-05-02"))
            .unwrap()
    };

    assert!(config.db_path().exists());
    let store = open_planner(&config).unwrap();
    assert_eq!(store.homework().len(), 1);
    assert_eq!(store.homework()[0].id, homework_id);
}

#[test]
fn storage_keys_select_independent_planners() {
    let root = tempfile::tempdir().unwrap();
    let main = PlannerConfig::new(root.path());
    let sandbox = PlannerConfig::new(root.path()).with_storage_key("sandbox");

    let mut store = open_planner(&sandbox).unwrap();
    store.reset_data();
    store
        .add_homework(NewHomework::new("1", "Scratch", "2024-05-02"))
        .unwrap();
    drop(store);

    assert!(open_planner(&main).unwrap().homework().is_empty());
    assert_eq!(open_planner(&sandbox).unwrap().homework().len(), 1);
}

#[test]
fn open_planner_rejects_blank_storage_key() {
    let root = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(root.path()).with_storage_key("");
    assert!(matches!(
        open_planner(&config),
        Err(ConfigError::EmptyStorageKey)
    ));
}

#[test]
fn open_planner_rejects_blank_db_file_name_before_touching_disk() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let config = PlannerConfig::new(&data_dir).with_db_file_name("");

    assert!(matches!(
        open_planner(&config),
        Err(ConfigError::EmptyDbFileName)
    ));
    assert!(!data_dir.exists());
}

#[test]
fn open_planner_starts_file_logging_when_configured() {
    let root = tempfile::tempdir().unwrap();
    let log_dir = root.path().join("logs");
    let config = PlannerConfig::new(root.path())
        .with_log_level("info")
        .with_log_dir(&log_dir);

    open_planner(&config).unwrap();

    let (level, dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(dir, log_dir);
    assert!(log_dir.is_dir());
}
