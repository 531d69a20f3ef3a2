//! Snapshot backups of the live database file.
//!
//! # Responsibility
//! - Produce standalone, restorable copies of the database under a fixed
//!   `backups/` directory next to the database file.
//! - Name artifacts by wall-clock timestamp at one-second resolution.
//!
//! # Invariants
//! - Snapshots use SQLite's online-backup API, so a copy taken while a
//!   reader is mid-flight is still a consistent database image.
//! - Two snapshots within the same second collide by name; the second
//!   overwrites the first. Documented behavior, no uniqueness suffix.

use crate::db::{StorageError, StorageResult};
use chrono::Local;
use log::info;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Directory created under the database file's parent.
pub const BACKUP_DIR_NAME: &str = "backups";

/// Artifact name prefix; the full shape is
/// `staffdesk_backup_<YYYYMMDD_HHMMSS>.db`.
pub const BACKUP_FILE_PREFIX: &str = "staffdesk_backup_";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_PAGES_PER_STEP: std::os::raw::c_int = 64;
const BACKUP_PAGE_PAUSE: Duration = Duration::from_millis(25);

/// Copies the open database into a timestamped artifact and returns its
/// path.
///
/// # Errors
/// - `BackupIo` when the backup directory cannot be created or the
///   database path has no parent.
/// - `Backup` when the online-backup run fails; the backup is considered
///   not taken.
pub fn create_snapshot(conn: &Connection, db_path: &Path) -> StorageResult<PathBuf> {
    let started_at = Instant::now();

    let parent = db_path.parent().ok_or_else(|| StorageError::BackupIo {
        path: db_path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "database path has no parent directory",
        ),
    })?;

    let backup_dir = parent.join(BACKUP_DIR_NAME);
    std::fs::create_dir_all(&backup_dir).map_err(|source| StorageError::BackupIo {
        path: backup_dir.clone(),
        source,
    })?;

    let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
    let artifact = backup_dir.join(format!("{BACKUP_FILE_PREFIX}{timestamp}.db"));

    let mut target = Connection::open(&artifact).map_err(|source| StorageError::Backup {
        path: artifact.clone(),
        source,
    })?;

    {
        let run = Backup::new(conn, &mut target).map_err(|source| StorageError::Backup {
            path: artifact.clone(),
            source,
        })?;
        run.run_to_completion(BACKUP_PAGES_PER_STEP, BACKUP_PAGE_PAUSE, None)
            .map_err(|source| StorageError::Backup {
                path: artifact.clone(),
                source,
            })?;
    }

    info!(
        "event=db_backup module=db status=ok duration_ms={} artifact={}",
        started_at.elapsed().as_millis(),
        artifact.display()
    );

    Ok(artifact)
}
