//! Acquiring and clearing the state file lock.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use crate::error::{Result, StateError};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Lock file path for a state file: `<dir>/<file name>.lock`.
pub fn lock_path_for(state_file: &Path) -> PathBuf {
    let mut name = state_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    state_file.with_file_name(name)
}

/// Acquire the lock guarding `state_file`.
///
/// The lock directory is never created: if the state file's directory is
/// missing, the state file cannot exist either, and the run fails with
/// `FileNotFound` without leaving anything on disk.
///
/// # Returns
///
/// * `Ok(LockGuard)` - Lock acquired; released when the guard drops
/// * `Err(StateError::FileNotFound)` - The state file's directory does not exist
/// * `Err(StateError::LockError)` - Another run holds the lock (exit code 2)
pub fn acquire_state_lock(state_file: &Path, action: &str) -> Result<LockGuard> {
    let lock_path = lock_path_for(state_file);
    let metadata = LockMetadata::new(action, state_file, Utc::now());

    LockGuard::create(lock_path.clone(), metadata).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => held_error(&lock_path),
        ErrorKind::NotFound => StateError::FileNotFound(state_file.to_path_buf()),
        _ => StateError::LockError(format!(
            "failed to create lock '{}': {}",
            lock_path.display(),
            e
        )),
    })
}

fn held_error(lock_path: &Path) -> StateError {
    let holder = match LockMetadata::from_file(lock_path) {
        Ok(meta) => meta.holder_summary(Utc::now()),
        Err(_) => "an unknown run".to_string(),
    };
    StateError::LockError(format!(
        "{} is held by {}\nIf that run is gone, use `collab-state unlock`.",
        lock_path.display(),
        holder
    ))
}

/// Result of [`clear_state_lock`].
#[derive(Debug)]
pub enum ClearedLock {
    /// There was no lock file.
    Absent,
    /// The lock file was removed. Metadata is `None` if the file was unreadable.
    Removed(Option<LockMetadata>),
}

/// Remove the lock guarding `state_file`.
///
/// Locks younger than `stale_minutes` are only removed with `force`.
/// A lock file whose metadata cannot be parsed is always removable.
pub fn clear_state_lock(state_file: &Path, stale_minutes: u32, force: bool) -> Result<ClearedLock> {
    let lock_path = lock_path_for(state_file);
    if !lock_path.exists() {
        return Ok(ClearedLock::Absent);
    }

    let now = Utc::now();
    let metadata = LockMetadata::from_file(&lock_path);
    if let Ok(meta) = &metadata
        && !force
        && !meta.is_stale_at(now, stale_minutes)
    {
        return Err(StateError::LockError(format!(
            "lock '{}' is not stale yet: {}; pass --force to remove it anyway",
            lock_path.display(),
            meta.holder_summary(now)
        )));
    }

    fs::remove_file(&lock_path).map_err(|e| {
        StateError::LockError(format!(
            "failed to remove lock '{}': {}",
            lock_path.display(),
            e
        ))
    })?;

    Ok(ClearedLock::Removed(metadata.ok()))
}
