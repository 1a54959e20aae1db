//! Advisory locking for the state file.
//!
//! A run that rewrites the state file first creates `<state file name>.lock`
//! next to it using **create_new** semantics (exclusive create), so a second
//! concurrent run fails fast instead of racing on the same document.
//!
//! # Lock Metadata
//!
//! The lock file contains JSON metadata:
//! - `owner`: who holds the lock (e.g., `user@HOST`)
//! - `pid`: the process ID
//! - `created_at`: RFC3339 timestamp
//! - `action`: the command holding the lock (e.g., `record`)
//! - `state_file`: the guarded state file
//!
//! # RAII Guards
//!
//! The lock is released when its [`LockGuard`] is dropped, but only if the
//! lock file still holds that guard's metadata. A failed release prints a
//! warning. A lock left behind by a crashed run can be removed with
//! `collab-state unlock`.

mod guard;
mod metadata;
mod operations;

#[cfg(test)]
mod tests;

// Re-export public API
pub use guard::{LockGuard, Release};
pub use metadata::{LockMetadata, format_age};
pub use operations::{ClearedLock, acquire_state_lock, clear_state_lock, lock_path_for};
pub(crate) use metadata::current_owner;
