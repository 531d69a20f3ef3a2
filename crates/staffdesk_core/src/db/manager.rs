//! Storage manager owning the single live SQLite connection.
//!
//! # Responsibility
//! - Resolve the database location and lazily open the file on first use.
//! - Trigger one-time schema bootstrap when the file is newly created.
//! - Expose scoped transactions and snapshot backups over the live handle.
//!
//! # Invariants
//! - One instance owns at most one live connection; `handle` always
//!   returns the same connection until `close`.
//! - `with_transaction` and `backup` are valid only while open.
//! - Bootstrap never runs against a pre-existing database file.
//!
//! # See also
//! - `db::schema` for the bootstrap batch semantics.
//! - `db::backup` for artifact naming and snapshot consistency.

use crate::config::paths::{PathResolutionError, PathResolver};
use crate::config::DB_FILE_NAME;
use crate::db::backup::create_snapshot;
use crate::db::schema::{apply_schema, SchemaSource};
use crate::db::{StorageError, StorageResult};
use log::{error, info, warn};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

struct OpenState {
    location: PathBuf,
    conn: Connection,
}

/// Long-lived storage service constructed once at application startup and
/// passed by reference to all consumers.
///
/// Construction is cheap and performs no IO; the first `handle` call
/// resolves the data directory, creates it if absent, opens (or creates)
/// the database file and bootstraps the schema for a newly created file.
/// `close` returns the manager to the uninitialized state, so the next
/// `handle` call repeats resolution and open, skipping bootstrap when the
/// file now exists.
///
/// The manager is not internally synchronized. Exclusive access is
/// enforced through `&mut self`, which also makes nested transactions
/// unrepresentable through this API.
pub struct StorageManager<P: PathResolver, S: SchemaSource> {
    resolver: P,
    schema: S,
    state: Option<OpenState>,
}

impl<P: PathResolver, S: SchemaSource> StorageManager<P, S> {
    /// Creates an unopened manager over the given collaborators.
    pub fn new(resolver: P, schema: S) -> Self {
        Self {
            resolver,
            schema,
            state: None,
        }
    }

    /// Returns whether a live connection is currently held.
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the resolved database location while open.
    pub fn location(&self) -> Option<&Path> {
        self.state.as_ref().map(|open| open.location.as_path())
    }

    /// Returns the shared live connection, opening it on first call.
    ///
    /// Repeated calls return the identical connection without repeating
    /// resolution, open or bootstrap.
    ///
    /// # Errors
    /// - `PathResolution` when no writable data directory is available.
    /// - `Open` when the file exists but cannot be opened or configured.
    /// - `SchemaApply` when the bootstrap batch fails; the batch is rolled
    ///   back as a unit and the file is left without the affected schema.
    pub fn handle(&mut self) -> StorageResult<&Connection> {
        if self.state.is_none() {
            self.state = Some(self.initialize()?);
        }

        match &self.state {
            Some(open) => Ok(&open.conn),
            None => Err(StorageError::NotReady),
        }
    }

    /// Runs `unit_of_work` inside one flat transaction on the live handle.
    ///
    /// Commits when the closure returns `Ok`; rolls back on `Err` before
    /// the error reaches the caller. Rollback is bound to scope exit, so
    /// early returns inside the closure cannot leak an open transaction.
    ///
    /// # Errors
    /// - `NotReady` when called before `handle` or after `close`.
    /// - `Transaction` when BEGIN or COMMIT fails; closure errors are
    ///   propagated unchanged after rollback.
    pub fn with_transaction<T, E, F>(&mut self, unit_of_work: F) -> Result<T, E>
    where
        E: From<StorageError>,
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    {
        let open = self.state.as_mut().ok_or(StorageError::NotReady)?;
        let tx = open.conn.transaction().map_err(StorageError::Transaction)?;

        // Drop of `tx` rolls back when the closure fails.
        let value = unit_of_work(&tx)?;

        tx.commit().map_err(StorageError::Transaction)?;
        Ok(value)
    }

    /// Produces a timestamped snapshot of the open database.
    ///
    /// See `db::backup` for naming and consistency semantics.
    pub fn backup(&mut self) -> StorageResult<PathBuf> {
        let open = self.state.as_ref().ok_or(StorageError::NotReady)?;
        create_snapshot(&open.conn, &open.location)
    }

    /// Releases the live connection and resets to the uninitialized state.
    ///
    /// Calling `close` while already closed is a no-op.
    pub fn close(&mut self) -> StorageResult<()> {
        let Some(open) = self.state.take() else {
            return Ok(());
        };

        info!(
            "event=db_close module=db status=ok path={}",
            open.location.display()
        );

        if let Err((_conn, err)) = open.conn.close() {
            error!("event=db_close module=db status=error error={err}");
            return Err(StorageError::Close(err));
        }
        Ok(())
    }

    fn initialize(&self) -> StorageResult<OpenState> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start");

        let data_dir = self.resolver.data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(|source| {
            StorageError::PathResolution(PathResolutionError::CreateDir {
                path: data_dir.clone(),
                source,
            })
        })?;

        let location = data_dir.join(DB_FILE_NAME);
        // The existence check and the open below are not atomic across
        // processes; this application is single-process.
        let existed = location.exists();

        let mut conn = match Connection::open(&location) {
            Ok(conn) => conn,
            Err(source) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_open_failed path={} error={source}",
                    started_at.elapsed().as_millis(),
                    location.display()
                );
                return Err(StorageError::Open {
                    path: location,
                    source,
                });
            }
        };

        configure_connection(&conn).map_err(|source| StorageError::Open {
            path: location.clone(),
            source,
        })?;

        if !existed {
            match self.schema.load() {
                Some(script) => {
                    apply_schema(&mut conn, &script)?;
                    info!(
                        "event=schema_bootstrap module=db status=ok path={}",
                        location.display()
                    );
                }
                None => {
                    warn!(
                        "event=schema_bootstrap module=db status=skipped error_code=schema_missing path={}",
                        location.display()
                    );
                }
            }
        }

        info!(
            "event=db_open module=db status=ok duration_ms={} created={} path={}",
            started_at.elapsed().as_millis(),
            !existed,
            location.display()
        );

        Ok(OpenState { location, conn })
    }
}

impl StorageManager<crate::config::paths::CloudSyncResolver, crate::db::schema::EmbeddedSchema> {
    /// Manager over the production collaborators: cloud-sync path
    /// resolution and the embedded schema.
    pub fn with_defaults() -> Self {
        Self::new(
            crate::config::paths::CloudSyncResolver::from_env(),
            crate::db::schema::EmbeddedSchema,
        )
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
