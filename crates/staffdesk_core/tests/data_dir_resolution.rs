use staffdesk_core::{CloudSyncResolver, PathResolutionError, PathResolver};
use std::path::PathBuf;

#[test]
fn prefers_existing_personal_cloud_root() {
    let cloud = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();

    let resolver = CloudSyncResolver::with_roots(
        "windows",
        Some(cloud.path().to_path_buf()),
        None,
        Some(home.path().to_path_buf()),
    );

    assert_eq!(
        resolver.data_dir().unwrap(),
        cloud.path().join("StaffDesk")
    );
}

#[test]
fn missing_cloud_root_falls_back_to_business_folder() {
    let profile = tempfile::tempdir().unwrap();
    let business = profile.path().join("OneDrive - StaffDesk");
    std::fs::create_dir_all(&business).unwrap();

    let resolver = CloudSyncResolver::with_roots(
        "windows",
        Some(PathBuf::from(r"C:\does\not\exist")),
        Some(profile.path().to_path_buf()),
        Some(profile.path().to_path_buf()),
    );

    assert_eq!(resolver.data_dir().unwrap(), business.join("StaffDesk"));
}

#[test]
fn no_candidates_fall_back_to_documents() {
    let home = tempfile::tempdir().unwrap();

    let resolver = CloudSyncResolver::with_roots(
        "windows",
        None,
        None,
        Some(home.path().to_path_buf()),
    );

    assert_eq!(
        resolver.data_dir().unwrap(),
        home.path().join("Documents").join("StaffDesk")
    );
}

#[test]
fn cloud_candidates_are_windows_only() {
    let cloud = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();

    let resolver = CloudSyncResolver::with_roots(
        "linux",
        Some(cloud.path().to_path_buf()),
        None,
        Some(home.path().to_path_buf()),
    );

    assert_eq!(
        resolver.data_dir().unwrap(),
        home.path().join("Documents").join("StaffDesk")
    );
}

#[test]
fn unknown_home_is_a_fatal_resolution_error() {
    let resolver = CloudSyncResolver::with_roots("linux", None, None, None);
    let err = resolver.data_dir().unwrap_err();
    assert!(matches!(err, PathResolutionError::NoHomeDirectory));
}
