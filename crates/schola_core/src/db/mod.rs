//! SQLite storage bootstrap for the planner blob.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by the snapshot repository.
//! - Apply schema migrations in deterministic order before first use.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No planner data is read or written before migrations succeed.
//! - Open and migration failures carry the file path or migration version.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the planner database.
#[derive(Debug)]
pub enum DbError {
    /// Database file could not be opened or created.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Migration `version` failed; nothing from the batch was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build of the planner.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open planner database {}: {source}", path.display())
            }
            Self::Migration { version, source } => {
                write!(f, "planner migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "planner database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn open_error_names_the_file() {
        let err = DbError::Open {
            path: PathBuf::from("/nowhere/planner.sqlite3"),
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(err.to_string().contains("/nowhere/planner.sqlite3"));
        assert!(err.source().is_some());
    }

    #[test]
    fn schema_version_error_has_no_source() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        };
        assert!(err.to_string().contains("version 9"));
        assert!(err.source().is_none());
    }
}
