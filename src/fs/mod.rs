//! Filesystem utilities for collab-state.
//!
//! The state file is rewritten wholesale on every run, so writes go through
//! [`atomic_write`] to keep the previous content intact if anything fails.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
