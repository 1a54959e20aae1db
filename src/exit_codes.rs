//! Exit code constants for the collab-state CLI.
//!
//! - 0: Success
//! - 1: State error (missing file, bad JSON, I/O failure, bad document or config)
//! - 2: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The state file could not be loaded, validated, or written.
pub const STATE_ERROR: i32 = 1;

/// Another run holds the lock on the state file.
pub const LOCK_FAILURE: i32 = 2;
