//! Ownership of an acquired state file lock.

use super::metadata::LockMetadata;
use crate::error::{Result, StateError};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// An acquired lock. Dropping it releases the lock.
///
/// Release only deletes the lock file while it still holds this guard's
/// metadata. A lock that was force-cleared and then taken by another run is
/// left alone.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    metadata: LockMetadata,
    released: bool,
}

/// How a release ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The lock file was ours and is gone.
    Removed,
    /// Someone already deleted the lock file.
    AlreadyGone,
}

impl LockGuard {
    /// Exclusively create `path` and write `metadata` into it.
    ///
    /// Fails with `AlreadyExists` when another run holds the lock. A partially
    /// written lock file is removed before returning the error.
    pub(super) fn create(path: PathBuf, metadata: LockMetadata) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let guard = Self {
            path,
            metadata,
            released: false,
        };

        let json = guard.metadata.to_json().map_err(io::Error::other)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &LockMetadata {
        &self.metadata
    }

    /// Release now, reporting problems instead of warning about them.
    pub fn release(mut self) -> Result<Release> {
        self.released = true;
        self.remove_if_owned()
    }

    fn remove_if_owned(&self) -> Result<Release> {
        match LockMetadata::from_file(&self.path) {
            Ok(current) if current != self.metadata => {
                return Err(StateError::LockError(format!(
                    "lock '{}' now belongs to {}; leaving it in place",
                    self.path.display(),
                    current.owner
                )));
            }
            Err(_) if !self.path.exists() => return Ok(Release::AlreadyGone),
            _ => {}
        }

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(Release::Removed),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Release::AlreadyGone),
            Err(e) => Err(StateError::LockError(format!(
                "failed to release lock '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.remove_if_owned() {
            eprintln!("Warning: {}", e);
        }
    }
}
