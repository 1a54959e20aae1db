//! Append-only audit log of recorded tasks.
//!
//! When an event log path is configured, every successful save appends one
//! NDJSON line (one JSON object per line):
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`record`)
//! - `actor`: `user@HOST` of the process that did it
//! - `task`: the task id, when the action concerns one task
//! - `details`: freeform object with action-specific details
//!
//! ```text
//! {"ts":"2026-10-18T09:15:02.123456Z","action":"record","actor":"dev@box","task":"1.6","details":{...}}
//! ```

use crate::error::{Result, StateError};
use crate::locks::current_owner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A task record was written to the state file.
    Record,
}

/// One line of the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    pub details: Value,
}

impl Event {
    /// New event stamped now, attributed to the current `user@HOST`.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: current_owner(),
            task: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task = Some(task_id.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.ts = ts;
        self
    }

    /// Serialize to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Append `event` to the log at `log_path`, creating the file and its
/// directory if needed.
pub fn append_event(log_path: &Path, event: &Event) -> Result<()> {
    let failure = |message: String| StateError::WriteFailure {
        path: log_path.to_path_buf(),
        message,
    };
    let json_line = event
        .to_ndjson_line()
        .map_err(|e| failure(format!("failed to serialize event to JSON: {}", e)))?;

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            failure(format!(
                "failed to create event log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| failure(format!("failed to open event log: {}", e)))?;

    writeln!(file, "{}", json_line)
        .map_err(|e| failure(format!("failed to append event: {}", e)))?;

    file.sync_all()
        .map_err(|e| failure(format!("failed to sync event log: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Record);

        assert_eq!(event.action, EventAction::Record);
        assert!(event.actor.contains('@'));
        assert!(event.task.is_none());
        assert!(event.details.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_event_serialization_is_single_line() {
        let event = Event::new(EventAction::Record)
            .with_task("1.6")
            .with_details(json!({"state_file": "a.json", "replaced": false}));

        let line = event.to_ndjson_line().unwrap();

        assert!(!line.contains('\n'));
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["action"], "record");
        assert_eq!(parsed["task"], "1.6");
        assert_eq!(parsed["details"]["replaced"], false);
    }

    #[test]
    fn test_event_without_task_omits_field() {
        let line = Event::new(EventAction::Record).to_ndjson_line().unwrap();

        assert!(!line.contains("\"task\""));
    }

    #[test]
    fn test_append_event_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join("logs").join("events.ndjson");

        append_event(&log, &Event::new(EventAction::Record).with_task("1.6")).unwrap();
        append_event(&log, &Event::new(EventAction::Record).with_task("1.7")).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        let tasks: Vec<String> = content
            .lines()
            .map(|line| {
                let event: Event = serde_json::from_str(line).unwrap();
                event.task.unwrap()
            })
            .collect();
        assert_eq!(tasks, vec!["1.6", "1.7"]);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_append_event_to_directory_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = append_event(temp_dir.path(), &Event::new(EventAction::Record)).unwrap_err();

        assert!(matches!(err, StateError::WriteFailure { .. }));
    }
}
