//! Tests for the locks subsystem.

use super::*;
use crate::error::StateError;
use chrono::{Duration, Utc};
use tempfile::TempDir;

fn state_path(temp_dir: &TempDir) -> std::path::PathBuf {
    let path = temp_dir.path().join("collaboration_state.json");
    std::fs::write(&path, "{\"tasks\": {}}").unwrap();
    path
}

fn write_lock(state_file: &std::path::Path, age: Duration) -> LockMetadata {
    let meta = LockMetadata::new("record", state_file, Utc::now() - age);
    std::fs::write(lock_path_for(state_file), meta.to_json().unwrap()).unwrap();
    meta
}

#[test]
fn test_lock_path_for() {
    assert_eq!(
        lock_path_for(std::path::Path::new("aideator-app/collaboration_state.json")),
        std::path::Path::new("aideator-app/collaboration_state.json.lock")
    );
}

#[test]
fn test_lock_metadata_describes_this_run() {
    let now = Utc::now();
    let meta = LockMetadata::new("record", std::path::Path::new("app/state.json"), now);

    assert!(meta.owner.contains('@'));
    assert_eq!(meta.pid, std::process::id());
    assert_eq!(meta.state_file, "app/state.json");
    assert!(!meta.is_stale_at(now + Duration::minutes(30), 30));
    assert!(meta.is_stale_at(now + Duration::minutes(31), 30));
}

#[test]
fn test_format_age() {
    assert_eq!(format_age(Duration::seconds(59)), "0m");
    assert_eq!(format_age(Duration::minutes(7)), "7m");
    assert_eq!(format_age(Duration::minutes(130)), "2h 10m");
    assert_eq!(format_age(Duration::hours(51)), "2d 3h");
    assert_eq!(format_age(Duration::minutes(-5)), "0m");
}

#[test]
fn test_holder_summary() {
    let now = Utc::now();
    let mut meta = LockMetadata::new("record", std::path::Path::new("state.json"), now);
    meta.owner = "dev@box".to_string();
    meta.pid = 4242;

    assert_eq!(
        meta.holder_summary(now + Duration::minutes(7)),
        "dev@box (pid 4242) running record for 7m"
    );
}

#[test]
fn test_metadata_survives_the_lock_file() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);

    let written = write_lock(&state, Duration::minutes(3));

    assert_eq!(LockMetadata::from_file(lock_path_for(&state)).unwrap(), written);
}

#[test]
fn test_acquire_writes_metadata_and_drop_releases() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);

    let guard = acquire_state_lock(&state, "record").unwrap();
    let meta = LockMetadata::from_file(guard.path()).unwrap();
    assert_eq!(meta.action, "record");

    let lock_path = guard.path().to_path_buf();
    drop(guard);
    assert!(!lock_path.exists());
}

#[test]
fn test_second_acquire_fails_with_holder_info() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);

    let _guard = acquire_state_lock(&state, "record").unwrap();
    let err = acquire_state_lock(&state, "record").unwrap_err();

    assert!(matches!(err, StateError::LockError(_)));
    assert_eq!(err.exit_code(), crate::exit_codes::LOCK_FAILURE);
    assert!(err.to_string().contains("running record"));
    assert!(err.to_string().contains("collab-state unlock"));
}

#[test]
fn test_release_removes_lock() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);

    let guard = acquire_state_lock(&state, "record").unwrap();
    assert_eq!(guard.release().unwrap(), Release::Removed);

    assert!(!lock_path_for(&state).exists());
    acquire_state_lock(&state, "record").unwrap();
}

#[test]
fn test_acquire_in_missing_directory_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let state = temp_dir.path().join("nowhere").join("state.json");

    let err = acquire_state_lock(&state, "record").unwrap_err();

    assert!(matches!(err, StateError::FileNotFound(p) if p == state));
    assert!(!temp_dir.path().join("nowhere").exists());
}

#[test]
fn test_clear_absent_lock() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);

    assert!(matches!(
        clear_state_lock(&state, 30, false).unwrap(),
        ClearedLock::Absent
    ));
}

#[test]
fn test_clear_refuses_fresh_lock_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    write_lock(&state, Duration::minutes(1));

    let err = clear_state_lock(&state, 30, false).unwrap_err();

    assert!(err.to_string().contains("--force"));
    assert!(lock_path_for(&state).exists());
}

#[test]
fn test_clear_fresh_lock_with_force() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    write_lock(&state, Duration::minutes(1));

    let cleared = clear_state_lock(&state, 30, true).unwrap();

    assert!(matches!(cleared, ClearedLock::Removed(Some(meta)) if meta.action == "record"));
    assert!(!lock_path_for(&state).exists());
}

#[test]
fn test_clear_stale_lock() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    write_lock(&state, Duration::hours(2));

    clear_state_lock(&state, 30, false).unwrap();

    assert!(!lock_path_for(&state).exists());
}

#[test]
fn test_clear_unreadable_lock() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    std::fs::write(lock_path_for(&state), "garbage").unwrap();

    let cleared = clear_state_lock(&state, 30, false).unwrap();

    assert!(matches!(cleared, ClearedLock::Removed(None)));
}

#[test]
fn test_release_leaves_a_lock_taken_over_by_another_run() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    let guard = acquire_state_lock(&state, "record").unwrap();

    // Forced clear, then another run locks the same file.
    clear_state_lock(&state, 30, true).unwrap();
    let mut other = LockMetadata::new("record", &state, Utc::now());
    other.pid = std::process::id().wrapping_add(1);
    std::fs::write(lock_path_for(&state), other.to_json().unwrap()).unwrap();

    let err = guard.release().unwrap_err();

    assert!(matches!(err, StateError::LockError(_)));
    assert_eq!(LockMetadata::from_file(lock_path_for(&state)).unwrap(), other);
}

#[test]
fn test_drop_after_forced_clear_is_quiet() {
    let temp_dir = TempDir::new().unwrap();
    let state = state_path(&temp_dir);
    let guard = acquire_state_lock(&state, "record").unwrap();

    clear_state_lock(&state, 30, true).unwrap();
    drop(guard);

    assert!(!lock_path_for(&state).exists());
}
