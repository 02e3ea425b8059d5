//! Planner bootstrap configuration.
//!
//! # Responsibility
//! - Collect where data and logs live and which storage key holds the blob.
//! - Wire logging, the database and the store together in one call.
//!
//! # Invariants
//! - The storage key is never blank.
//! - File logging starts only when a log directory is configured.

use crate::db::open_db;
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::snapshot_repo::{RepoError, SqliteSnapshotRepository, DEFAULT_STORAGE_KEY};
use crate::service::planner_store::PlannerStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Database file created inside `data_dir` by default.
pub const DEFAULT_DB_FILE_NAME: &str = "schola.sqlite3";

/// Where and how the planner keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub storage_key: String,
    pub log_level: String,
    /// Absolute directory for rotating log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl PlannerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    pub fn with_db_file_name(mut self, name: impl Into<String>) -> Self {
        self.db_file_name = name.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.db_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyDbFileName);
        }
        Ok(())
    }
}

/// Bootstrap failures surfaced by [`open_planner`].
#[derive(Debug)]
pub enum ConfigError {
    EmptyStorageKey,
    EmptyDbFileName,
    DataDir(std::io::Error),
    Logging(LoggingError),
    Storage(RepoError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key must not be empty"),
            Self::EmptyDbFileName => write!(f, "database file name must not be empty"),
            Self::DataDir(err) => write!(f, "cannot prepare data directory: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataDir(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::EmptyStorageKey | Self::EmptyDbFileName => None,
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<RepoError> for ConfigError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Opens the planner described by `config`.
///
/// Starts logging (when configured), opens and migrates the database, then
/// loads the store. A corrupt stored blob does not fail this call; the store
/// falls back to seed state.
pub fn open_planner(
    config: &PlannerConfig,
) -> Result<PlannerStore<SqliteSnapshotRepository>, ConfigError> {
    config.validate()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    ensure_data_dir(&config.data_dir)?;
    let conn = open_db(config.db_path()).map_err(RepoError::from)?;
    let repo = SqliteSnapshotRepository::try_new(conn, config.storage_key.as_str())?;
    info!(
        "event=planner_open module=config status=ok db_file={}",
        config.db_file_name
    );
    Ok(PlannerStore::open(repo))
}

fn ensure_data_dir(path: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(path).map_err(ConfigError::DataDir)
}
