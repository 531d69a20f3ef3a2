//! Schema script source and one-shot bootstrap executor.
//!
//! # Responsibility
//! - Supply the DDL batch applied to a newly created database file.
//! - Apply the whole batch atomically; a partial failure leaves nothing.
//!
//! # Invariants
//! - The script is versionless; bootstrap runs only when the database file
//!   did not exist before opening.
//! - An absent script is tolerated and skipped, never invented.

use crate::db::{StorageError, StorageResult};
use rusqlite::Connection;

/// Supplies the DDL script text for bootstrap.
///
/// Returning `None` means the resource is missing; the manager skips
/// bootstrap and logs the condition loudly. That leaves an empty database
/// with no tables, matching the long-standing desktop behavior.
pub trait SchemaSource {
    fn load(&self) -> Option<String>;
}

/// Default source: the schema shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSchema;

const SCHEMA_SQL: &str = include_str!("schema.sql");

impl SchemaSource for EmbeddedSchema {
    fn load(&self) -> Option<String> {
        Some(SCHEMA_SQL.to_string())
    }
}

/// Applies the whole script as one committed batch.
///
/// A failure anywhere in the batch rolls back every statement already
/// executed and surfaces as `SchemaApply`.
pub(crate) fn apply_schema(conn: &mut Connection, script: &str) -> StorageResult<()> {
    let tx = conn.transaction().map_err(StorageError::SchemaApply)?;
    tx.execute_batch(script).map_err(StorageError::SchemaApply)?;
    tx.commit().map_err(StorageError::SchemaApply)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_schema, EmbeddedSchema, SchemaSource};
    use rusqlite::Connection;

    #[test]
    fn embedded_schema_is_present() {
        let script = EmbeddedSchema.load().expect("embedded schema must exist");
        assert!(script.contains("CREATE TABLE IF NOT EXISTS employees"));
    }

    #[test]
    fn failed_batch_leaves_no_partial_schema() {
        let mut conn = Connection::open_in_memory().expect("open in-memory db");
        let script = "CREATE TABLE alpha(id INTEGER PRIMARY KEY);\nCREATE BROKEN;";

        apply_schema(&mut conn, script).expect_err("broken batch must fail");

        let alpha_exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'alpha'
                );",
                [],
                |row| row.get(0),
            )
            .expect("query sqlite_master");
        assert_eq!(alpha_exists, 0, "partial batch must be rolled back");
    }
}
