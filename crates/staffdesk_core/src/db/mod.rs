//! SQLite storage lifecycle: connection management, one-time schema
//! bootstrap, scoped transactions and snapshot backups.
//!
//! # Responsibility
//! - Own the single live connection per storage manager instance.
//! - Apply the schema script exactly once, on first creation of the file.
//! - Guarantee commit-or-rollback on every transaction exit path.
//!
//! # Invariants
//! - `StorageManager::handle` is the only initialization entry point;
//!   transactions and backups outside the open state fail with `NotReady`.
//! - No failure is swallowed except the documented missing-schema skip,
//!   which is logged with a stable `error_code`.

use crate::config::paths::PathResolutionError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod backup;
pub mod manager;
pub mod schema;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error taxonomy.
///
/// Fatal startup conditions (`PathResolution`, `Open`) surface to the
/// caller unchanged; nothing in this layer retries.
#[derive(Debug)]
pub enum StorageError {
    /// No writable data directory could be resolved or created.
    PathResolution(PathResolutionError),
    /// The database file exists but cannot be opened or configured.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Engine-level transport error outside a dedicated lifecycle step.
    Sqlite(rusqlite::Error),
    /// The bootstrap batch failed partway; the whole batch was rolled back.
    SchemaApply(rusqlite::Error),
    /// BEGIN or COMMIT failed; unit-of-work errors propagate unchanged.
    Transaction(rusqlite::Error),
    /// Backup directory creation or artifact path handling failed.
    BackupIo {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The online-backup run itself failed; no artifact was produced.
    Backup {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// The connection could not be released cleanly.
    Close(rusqlite::Error),
    /// Lifecycle error: the operation requires an open handle.
    NotReady,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathResolution(err) => write!(f, "{err}"),
            Self::Open { path, source } => {
                write!(f, "failed to open database at `{}`: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaApply(err) => {
                write!(f, "schema bootstrap failed and was rolled back: {err}")
            }
            Self::Transaction(err) => write!(f, "transaction control failed: {err}"),
            Self::BackupIo { path, source } => {
                write!(f, "backup io failed at `{}`: {source}", path.display())
            }
            Self::Backup { path, source } => {
                write!(f, "backup snapshot failed for `{}`: {source}", path.display())
            }
            Self::Close(err) => write!(f, "failed to close database: {err}"),
            Self::NotReady => {
                write!(f, "storage is not open; acquire the handle before use")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PathResolution(err) => Some(err),
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaApply(err) => Some(err),
            Self::Transaction(err) => Some(err),
            Self::BackupIo { source, .. } => Some(source),
            Self::Backup { source, .. } => Some(source),
            Self::Close(err) => Some(err),
            Self::NotReady => None,
        }
    }
}

impl From<PathResolutionError> for StorageError {
    fn from(value: PathResolutionError) -> Self {
        Self::PathResolution(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
