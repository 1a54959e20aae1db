//! Constants and default value functions used by the Config struct.

/// State file location, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "aideator-app/collaboration_state.json";

/// Priorities accepted for a task record.
pub const PRIORITIES: &[&str] = &["high", "medium", "low"];

pub(crate) fn default_state_file() -> String {
    DEFAULT_STATE_FILE.to_string()
}

pub(crate) fn default_actor() -> String {
    "AI_Developer_01".to_string()
}

pub(crate) fn default_prior_task_id() -> String {
    "1.5".to_string()
}

/// Placeholder in `state_note` replaced by the recorded task id.
pub const TASK_ID_PLACEHOLDER: &str = "{task_id}";

pub(crate) fn default_state_note() -> String {
    " Task {task_id} completed by AI Agent. ".to_string()
}

pub(crate) fn default_task_id() -> String {
    "1.6".to_string()
}

pub(crate) fn default_description() -> String {
    "Implement MCP Agent-to-Agent Framework.".to_string()
}

pub(crate) fn default_status() -> String {
    "completed".to_string()
}

pub(crate) fn default_assigned_to() -> String {
    default_actor()
}

pub(crate) fn default_dependencies() -> Vec<String> {
    vec!["1.1".to_string()]
}

pub(crate) fn default_priority() -> String {
    "high".to_string()
}

pub(crate) fn default_outputs() -> Vec<String> {
    [
        "./aideator-app/src/mcp/types.ts",
        "./aideator-app/src/mcp/MCPManager.ts",
        "./aideator-app/src/agents/SampleAgent.ts",
        "./aideator-app/src/index.ts (updated)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn default_task_notes() -> String {
    "Successfully implemented the initial MCP (Multi-Agent Communication Protocol) framework \
     including core manager, message types, and a sample agent integration. \
     Jules (AI Agent) performed this task."
        .to_string()
}

pub(crate) fn default_label() -> String {
    "MCP Framework".to_string()
}

pub(crate) fn default_lock_stale_minutes() -> u32 {
    30
}
