//! Atomic file replacement.
//!
//! All writes follow the same pattern:
//! 1. Resolve symlinks, so the file a link points at is the one replaced
//! 2. Write content to `.{filename}.tmp` next to that file and fsync it
//! 3. Give the temp file the permissions of the file it replaces
//! 4. Rename it over the target
//!
//! `rename` replaces the destination on both POSIX and Windows, and is atomic
//! as long as source and destination share a filesystem, which the sibling
//! temp file guarantees. A crash between steps can leave the temp file behind;
//! the target itself is never partially written.

use crate::error::{Result, StateError};
use std::fs::{self, File, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to `path`.
///
/// The parent directory must already exist; a missing directory is reported
/// as a write failure rather than created. An existing read-only target is
/// refused the same way `open` for writing would refuse it.
///
/// # Returns
///
/// * `Ok(())` - The target now holds exactly `content`
/// * `Err(StateError::WriteFailure)` - The target is read-only, or the temp
///   file could not be written or renamed
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let target = resolve_target(path);
    let permissions = existing_permissions(path, &target)?;

    let temp_path = generate_temp_path(path, &target)?;
    write_and_sync(path, &temp_path, content)?;
    if let Some(permissions) = permissions {
        fs::set_permissions(&temp_path, permissions).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_failure(path, format!("failed to copy file permissions: {}", e))
        })?;
    }
    replace(path, &temp_path, &target)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// The file that actually gets replaced: `path` with symlinks resolved, or
/// `path` itself when it does not exist yet.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn existing_permissions(path: &Path, target: &Path) -> Result<Option<Permissions>> {
    let Ok(metadata) = fs::metadata(target) else {
        return Ok(None);
    };
    let permissions = metadata.permissions();
    if metadata.is_file() && permissions.readonly() {
        return Err(write_failure(path, "file is read-only".to_string()));
    }
    Ok(Some(permissions))
}

/// Temp file path in the same directory as the target: `.{filename}.tmp`.
fn generate_temp_path(path: &Path, target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| write_failure(path, "invalid file path".to_string()))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| {
        write_failure(
            path,
            format!(
                "failed to create temporary file '{}': {}",
                temp_path.display(),
                e
            ),
        )
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        write_failure(path, format!("failed to write temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(temp_path);
        write_failure(path, format!("failed to sync temporary file: {}", e))
    })?;

    Ok(())
}

fn replace(path: &Path, temp_path: &Path, target: &Path) -> Result<()> {
    fs::rename(temp_path, target).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        write_failure(path, format!("failed to replace file: {}", e))
    })?;

    sync_parent_dir(target);
    Ok(())
}

/// Persist the renamed directory entry. Best effort.
#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}

fn write_failure(path: &Path, message: String) -> StateError {
    StateError::WriteFailure {
        path: path.to_path_buf(),
        message,
    }
}
