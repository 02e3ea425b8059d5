//! Snapshot repository contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Read, write and remove the serialized planner blob.
//!
//! # Invariants
//! - `load_snapshot` returns `Ok(None)` only when no blob exists.
//! - `save_snapshot` replaces the stored blob in a single statement.
//! - `clear_snapshot` is idempotent.
//! - A blob that fails to parse is copied to `<key>.unreadable` before the
//!   error is returned, so a later save cannot destroy it.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::snapshot::PlannerSnapshot;
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Storage key used when the caller does not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "schola_app_data_v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure while reading or writing the planner blob.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Blob could not be serialized or parsed.
    InvalidData(serde_json::Error),
    /// Connection is not migrated for snapshot storage.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(err) => write!(f, "invalid persisted planner data: {err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value)
    }
}

/// Durable storage for the planner snapshot.
pub trait SnapshotRepository {
    /// Reads the stored snapshot, `None` when nothing was saved yet.
    fn load_snapshot(&self) -> RepoResult<Option<PlannerSnapshot>>;
    /// Replaces the stored snapshot.
    fn save_snapshot(&mut self, snapshot: &PlannerSnapshot) -> RepoResult<()>;
    /// Removes the stored snapshot, if any.
    fn clear_snapshot(&mut self) -> RepoResult<()>;
}

/// SQLite-backed snapshot storage using a `kv_store` row per key.
pub struct SqliteSnapshotRepository {
    conn: Connection,
    key: String,
}

impl SqliteSnapshotRepository {
    /// Wraps a migrated connection, storing under `key`.
    pub fn try_new(conn: Connection, key: impl Into<String>) -> RepoResult<Self> {
        ensure_kv_table(&conn)?;
        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    /// Opens the database file at `path` and stores under the default key.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?, DEFAULT_STORAGE_KEY)
    }

    /// Throwaway in-memory storage.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw stored blob, mainly for diagnostics.
    pub fn raw_value(&self) -> RepoResult<Option<String>> {
        read_value(&self.conn, &self.key)
    }

    /// Overwrites the stored blob with arbitrary text.
    ///
    /// Used to import a blob exported elsewhere; the text is not checked
    /// until the next load.
    pub fn write_raw_value(&mut self, value: &str) -> RepoResult<()> {
        upsert_value(&self.conn, &self.key, value)
    }

    /// Key holding the last blob that failed to parse.
    pub fn unreadable_key(&self) -> String {
        format!("{}.unreadable", self.key)
    }

    /// The last blob that failed to parse, if any.
    pub fn unreadable_value(&self) -> RepoResult<Option<String>> {
        read_value(&self.conn, &self.unreadable_key())
    }

    fn keep_unreadable(&self, blob: &str) {
        let backup_key = self.unreadable_key();
        match upsert_value(&self.conn, &backup_key, blob) {
            Ok(()) => warn!(
                "event=snapshot_backup module=repo status=ok key={} bytes={}",
                backup_key,
                blob.len()
            ),
            Err(err) => error!(
                "event=snapshot_backup module=repo status=error key={backup_key} error_code=backup_failed error={err}"
            ),
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn load_snapshot(&self) -> RepoResult<Option<PlannerSnapshot>> {
        let Some(blob) = self.raw_value()? else {
            return Ok(None);
        };
        match serde_json::from_str(&blob) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                self.keep_unreadable(&blob);
                Err(RepoError::InvalidData(err))
            }
        }
    }

    fn save_snapshot(&mut self, snapshot: &PlannerSnapshot) -> RepoResult<()> {
        let blob = serde_json::to_string(snapshot)?;
        self.write_raw_value(&blob)
    }

    fn clear_snapshot(&mut self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE key = ?1;",
            [self.key.as_str()],
        )?;
        Ok(())
    }
}

fn read_value(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

fn upsert_value(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )?;
    Ok(())
}

fn ensure_kv_table(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("kv_store"));
    }
    Ok(())
}
