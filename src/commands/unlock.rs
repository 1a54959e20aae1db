//! Implementation of the `collab-state unlock` command.

use crate::cli::UnlockArgs;
use crate::config::Config;
use crate::error::Result;
use crate::locks::{self, ClearedLock};
use chrono::Utc;
use std::path::Path;

/// Execute the `collab-state unlock` command.
///
/// Locks younger than `lock_stale_minutes` need `--force`.
pub fn cmd_unlock(state_file: &Path, config: &Config, args: UnlockArgs) -> Result<()> {
    let lock_path = locks::lock_path_for(state_file);

    match locks::clear_state_lock(state_file, config.lock_stale_minutes, args.force)? {
        ClearedLock::Absent => println!("No lock on {}.", state_file.display()),
        ClearedLock::Removed(Some(meta)) => {
            println!("Removed lock: {}", lock_path.display());
            println!("  Held by: {}", meta.holder_summary(Utc::now()));
            println!("  Guarded: {}", meta.state_file);
        }
        ClearedLock::Removed(None) => {
            println!("Removed unreadable lock: {}", lock_path.display());
        }
    }

    Ok(())
}
