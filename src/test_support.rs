use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches the process working directory for the lifetime of the guard.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; hold the lock even if a
        // #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Write a state file at `dir/relative`, creating directories as needed.
pub(crate) fn write_state(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// A state document shaped like the real collaboration state file.
pub(crate) const SAMPLE_STATE: &str = r#"{
  "projectName": "AIdeator",
  "version": 3,
  "tasks": {
    "1.1": {
      "description": "Initialize project structure.",
      "status": "completed",
      "assignedTo": "AI_Developer_01",
      "dependencies": [],
      "priority": "high",
      "startTime": "2026-10-01T09:00:00+00:00",
      "endTime": "2026-10-01T10:00:00+00:00",
      "outputs": ["./aideator-app/package.json"],
      "notes": ""
    },
    "1.5": {
      "description": "Configure Jest.",
      "status": "completed",
      "assignedTo": "AI_Developer_01",
      "dependencies": ["1.1"],
      "priority": "medium",
      "startTime": "2026-10-17T16:00:00+00:00",
      "endTime": "2026-10-17T18:30:00.000000+00:00",
      "outputs": ["./aideator-app/jest.config.cjs"],
      "notes": "ESM needs extra config."
    }
  },
  "agents": {"AI_Developer_01": {"role": "developer", "active": true}},
  "lastUpdatedAt": "2026-10-17T18:30:00.000000+00:00",
  "lastUpdatedBy": "AI_Developer_01",
  "notes": "Project kickoff."
}"#;
