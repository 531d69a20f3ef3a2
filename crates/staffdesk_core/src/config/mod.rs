//! Static application configuration.
//!
//! # Responsibility
//! - Define presentation constants consumed by the UI shell.
//! - Fix the database file name used by the storage layer.
//! - Resolve the per-user data directory (see [`paths`]).
//!
//! # Invariants
//! - `DB_FILE_NAME` is fixed and versionless for the application lifetime.
//! - The storage core reads nothing from this module except `DB_FILE_NAME`
//!   and the resolver contract.

pub mod paths;

/// Human-visible application name.
pub const APP_NAME: &str = "StaffDesk";

/// Directory component appended under every resolved storage root.
pub const APP_DIR_NAME: &str = "StaffDesk";

/// Fixed on-disk database file name.
pub const DB_FILE_NAME: &str = "staffdesk.db";

/// Default main-window width in logical pixels.
pub const WINDOW_WIDTH: u32 = 1400;

/// Default main-window height in logical pixels.
pub const WINDOW_HEIGHT: u32 = 900;

/// Theme identifier consumed by the UI shell.
pub const THEME: &str = "dark_blue";

/// Returns the application version.
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{app_version, DB_FILE_NAME};

    #[test]
    fn db_file_name_is_stable() {
        assert_eq!(DB_FILE_NAME, "staffdesk.db");
    }

    #[test]
    fn app_version_is_not_empty() {
        assert!(!app_version().is_empty());
    }
}
