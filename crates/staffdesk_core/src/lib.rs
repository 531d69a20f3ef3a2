//! Core domain logic for StaffDesk.
//! This crate is the single source of truth for storage lifecycle and
//! employee-record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::paths::{
    CloudSyncResolver, FixedPathResolver, PathResolutionError, PathResolver,
};
pub use db::backup::create_snapshot;
pub use db::manager::StorageManager;
pub use db::schema::{EmbeddedSchema, SchemaSource};
pub use db::{StorageError, StorageResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::DocumentError;
pub use model::employee::{Employee, EmployeeId, EmployeeStatus, EmployeeValidationError};
pub use repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::{EmployeeService, RegisterEmployeeRequest};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
