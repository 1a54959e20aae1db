//! Task records stored under the state document's `tasks` mapping.
//!
//! A record serializes with camelCase keys in a fixed order:
//!
//! ```text
//! {
//!   "description": "Implement MCP Agent-to-Agent Framework.",
//!   "status": "completed",
//!   "assignedTo": "AI_Developer_01",
//!   "dependencies": ["1.1"],
//!   "priority": "high",
//!   "startTime": "2026-10-18T09:00:00.000000+00:00",
//!   "endTime": "2026-10-18T09:15:02.123456+00:00",
//!   "outputs": ["./aideator-app/src/mcp/types.ts"],
//!   "notes": "..."
//! }
//! ```

use crate::config::TaskTemplate;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;


/// One unit of work recorded in the state document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub description: String,
    pub status: String,
    pub assigned_to: String,
    pub dependencies: Vec<String>,
    pub priority: String,
    pub start_time: String,
    pub end_time: String,
    pub outputs: Vec<String>,
    pub notes: String,
}

impl TaskRecord {
    /// Build a record from the configured template, stamped with the given times.
    pub fn from_template(template: &TaskTemplate, start_time: String, end_time: String) -> Self {
        Self {
            description: template.description.clone(),
            status: template.status.clone(),
            assigned_to: template.assigned_to.clone(),
            dependencies: template.dependencies.clone(),
            priority: template.priority.clone(),
            start_time,
            end_time,
            outputs: template.outputs.clone(),
            notes: template.notes.clone(),
        }
    }
}

/// Format an instant the way the state document stores timestamps.
///
/// RFC 3339 with microseconds and an explicit `+00:00` offset. The fraction is
/// always six digits, `.000000` included.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Pick the start time for a new record.
///
/// The prior task's `endTime` wins when it is a non-empty string; anything
/// else (absent, null, empty, or not a string) falls back to `now`.
pub fn resolve_start_time(prior_end_time: Option<&Value>, now: &str) -> String {
    match prior_end_time {
        Some(Value::String(end)) if !end.is_empty() => end.clone(),
        _ => now.to_string(),
    }
}
