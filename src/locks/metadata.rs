//! What a lock file says about the run holding it.

use crate::error::{Result, StateError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of `<state file>.lock`.
///
/// A guard only deletes a lock file whose contents still equal the metadata
/// it wrote, so two values compare equal exactly when they describe the same
/// acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMetadata {
    /// `user@HOST` of the holder.
    pub owner: String,
    pub pid: u32,
    pub created_at: DateTime<Utc>,
    /// Command holding the lock (`record`).
    pub action: String,
    /// The state file the lock guards, as given on the command line.
    pub state_file: String,
}

impl LockMetadata {
    pub fn new(action: &str, state_file: &Path, now: DateTime<Utc>) -> Self {
        Self {
            owner: current_owner(),
            pid: std::process::id(),
            created_at: now,
            action: action.to_string(),
            state_file: state_file.display().to_string(),
        }
    }

    /// Read the metadata of an existing lock file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| {
            StateError::LockError(format!("lock file '{}' {}", path.display(), reason))
        };

        let content =
            fs::read_to_string(path).map_err(|e| unreadable(format!("cannot be read: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| unreadable(format!("does not hold lock metadata: {}", e)))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }

    /// Older than `stale_minutes` at `now`.
    pub fn is_stale_at(&self, now: DateTime<Utc>, stale_minutes: u32) -> bool {
        self.age_at(now) > Duration::minutes(i64::from(stale_minutes))
    }

    /// One line naming the holder, e.g. `dev@box (pid 4242) running record for 7m`.
    pub fn holder_summary(&self, now: DateTime<Utc>) -> String {
        format!(
            "{} (pid {}) running {} for {}",
            self.owner,
            self.pid,
            self.action,
            format_age(self.age_at(now))
        )
    }
}

/// Compact age: `2d 3h`, `4h 10m`, `7m`. Clock skew shows as `0m`.
pub fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes().max(0);
    match (minutes / (24 * 60), minutes / 60 % 24, minutes % 60) {
        (0, 0, m) => format!("{}m", m),
        (0, h, m) => format!("{}h {}m", h, m),
        (d, h, _) => format!("{}d {}h", d, h),
    }
}

/// `user@HOST` of this process; missing parts read `unknown`.
pub(crate) fn current_owner() -> String {
    let user = ["USER", "USERNAME"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string());
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    format!("{}@{}", user, host)
}
