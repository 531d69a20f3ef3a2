//! Data-directory resolution for cloud-synced and local storage roots.
//!
//! # Responsibility
//! - Pick the directory that holds the database file, preferring a
//!   cloud-synced folder when one exists on this machine.
//! - Keep environment and platform facts injectable for tests.
//!
//! # Invariants
//! - Resolution never creates directories; the storage manager owns that.
//! - Candidate order is stable: personal cloud root, business cloud folder
//!   under the user profile, then the local `Documents` fallback.

use crate::config::APP_DIR_NAME;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable holding the personal cloud-sync root.
const CLOUD_SYNC_ENV: &str = "OneDrive";

/// Environment variable holding the user-profile root on Windows.
const PROFILE_ENV: &str = "USERPROFILE";

/// Business cloud-sync folder name under the user profile.
const CLOUD_BUSINESS_DIR: &str = "OneDrive - StaffDesk";

/// Fatal resolution failure; the application cannot run without storage.
#[derive(Debug)]
pub enum PathResolutionError {
    /// Neither a cloud root nor a home directory is known.
    NoHomeDirectory,
    /// The resolved directory could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for PathResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirectory => {
                write!(f, "no usable storage location: home directory is unknown")
            }
            Self::CreateDir { path, source } => {
                write!(
                    f,
                    "failed to create data directory `{}`: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for PathResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoHomeDirectory => None,
            Self::CreateDir { source, .. } => Some(source),
        }
    }
}

/// Resolver contract consumed by the storage manager.
///
/// Implementations return the directory that should contain the database
/// file. The directory may not exist yet.
pub trait PathResolver {
    fn data_dir(&self) -> Result<PathBuf, PathResolutionError>;
}

/// Resolver preferring cloud-synced folders, mirroring the desktop install
/// layout: personal cloud root first, business folder second, local
/// `Documents` fallback last.
#[derive(Debug, Clone)]
pub struct CloudSyncResolver {
    platform: &'static str,
    cloud_root: Option<PathBuf>,
    profile_root: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl CloudSyncResolver {
    /// Builds a resolver from the live process environment.
    pub fn from_env() -> Self {
        Self {
            platform: std::env::consts::OS,
            cloud_root: env_path(CLOUD_SYNC_ENV),
            profile_root: env_path(PROFILE_ENV),
            home: env_path("HOME").or_else(|| env_path(PROFILE_ENV)),
        }
    }

    /// Builds a resolver from explicit platform and root facts.
    ///
    /// Used by tests and portable deployments to avoid touching the real
    /// process environment.
    pub fn with_roots(
        platform: &'static str,
        cloud_root: Option<PathBuf>,
        profile_root: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            platform,
            cloud_root,
            profile_root,
            home,
        }
    }
}

impl PathResolver for CloudSyncResolver {
    fn data_dir(&self) -> Result<PathBuf, PathResolutionError> {
        // Cloud candidates are only meaningful where the sync client
        // maintains these folder conventions.
        if self.platform == "windows" {
            if let Some(cloud_root) = &self.cloud_root {
                if cloud_root.is_dir() {
                    return Ok(cloud_root.join(APP_DIR_NAME));
                }
            }

            if let Some(profile_root) = &self.profile_root {
                let business = profile_root.join(CLOUD_BUSINESS_DIR);
                if business.is_dir() {
                    return Ok(business.join(APP_DIR_NAME));
                }
            }
        }

        let home = self
            .home
            .as_ref()
            .ok_or(PathResolutionError::NoHomeDirectory)?;
        Ok(home.join("Documents").join(APP_DIR_NAME))
    }
}

/// Resolver returning one caller-supplied directory verbatim.
///
/// Lets tests point independent storage managers at isolated temporary
/// locations.
#[derive(Debug, Clone)]
pub struct FixedPathResolver {
    dir: PathBuf,
}

impl FixedPathResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PathResolver for FixedPathResolver {
    fn data_dir(&self) -> Result<PathBuf, PathResolutionError> {
        Ok(self.dir.clone())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
