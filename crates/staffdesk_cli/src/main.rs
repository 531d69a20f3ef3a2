//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `staffdesk_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use staffdesk_core::{CloudSyncResolver, PathResolver};

fn main() {
    println!("staffdesk_core ping={}", staffdesk_core::ping());
    println!("staffdesk_core version={}", staffdesk_core::core_version());

    match CloudSyncResolver::from_env().data_dir() {
        Ok(dir) => println!("data_dir={}", dir.display()),
        Err(err) => println!("data_dir_error={err}"),
    }
}
