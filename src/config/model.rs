//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a collab-state run.
///
/// Loaded from the YAML file passed with `--config`; CLI flags override it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the JSON state file.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Written to `lastUpdatedBy`.
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Task whose `endTime` becomes the new record's `startTime` when set.
    #[serde(default = "default_prior_task_id")]
    pub prior_task_id: String,

    /// Sentence appended to the document's top-level `notes`.
    /// `{task_id}` is replaced with the recorded task id.
    #[serde(default = "default_state_note")]
    pub state_note: String,

    /// NDJSON audit log to append to after a successful save (disabled when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<String>,

    /// Minutes after which `unlock` removes a lock without `--force`.
    #[serde(default = "default_lock_stale_minutes")]
    pub lock_stale_minutes: u32,

    /// The record to insert.
    #[serde(default)]
    pub task: TaskTemplate,
}

/// Values used to build the inserted task record.
///
/// Timestamps are not configurable; they come from the run itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskTemplate {
    #[serde(default = "default_task_id")]
    pub id: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_assigned_to")]
    pub assigned_to: String,

    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<String>,

    /// One of `high`, `medium`, `low` (case-insensitive on input).
    #[serde(default = "default_priority")]
    pub priority: String,

    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,

    #[serde(default = "default_task_notes")]
    pub notes: String,

    /// Short name appended to the run report (`... with new task 1.6 for <label>.`).
    /// Empty drops the suffix. Not written to the record.
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            actor: default_actor(),
            prior_task_id: default_prior_task_id(),
            state_note: default_state_note(),
            event_log: None,
            lock_stale_minutes: default_lock_stale_minutes(),
            task: TaskTemplate::default(),
        }
    }
}

impl Default for TaskTemplate {
    fn default() -> Self {
        Self {
            id: default_task_id(),
            description: default_description(),
            status: default_status(),
            assigned_to: default_assigned_to(),
            dependencies: default_dependencies(),
            priority: default_priority(),
            outputs: default_outputs(),
            notes: default_task_notes(),
            label: default_label(),
        }
    }
}
