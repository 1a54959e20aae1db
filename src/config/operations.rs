//! Config loading and validation.

use super::model::Config;
use super::types::{PRIORITIES, TASK_ID_PLACEHOLDER};
use crate::error::{Result, StateError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Task identifiers are used as JSON keys and shown in messages; keep them plain.
static TASK_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid task ID regex")
});

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded, normalized, and validated config
    /// * `Err(StateError::ConfigError)` - Read, parse, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StateError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| StateError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// The note to append to the document, with the task id filled in.
    pub fn rendered_state_note(&self) -> String {
        self.state_note.replace(TASK_ID_PLACEHOLDER, &self.task.id)
    }

    /// Canonicalize values that accept more than one spelling.
    pub fn normalize(&mut self) {
        self.task.priority = self.task.priority.trim().to_lowercase();
    }

    /// Validate config values.
    ///
    /// Rules:
    /// - `task.id` and `prior_task_id` are plain identifiers
    /// - `task.priority` is one of `high`, `medium`, `low`
    /// - `task.status`, `actor`, and `state_file` are non-empty
    /// - `lock_stale_minutes` is positive
    pub fn validate(&self) -> Result<()> {
        if self.lock_stale_minutes == 0 {
            return Err(StateError::ConfigError(
                "config validation failed: lock_stale_minutes must be greater than 0".to_string(),
            ));
        }

        validate_task_id("task.id", &self.task.id)?;
        validate_task_id("prior_task_id", &self.prior_task_id)?;

        if !PRIORITIES.contains(&self.task.priority.as_str()) {
            return Err(StateError::ConfigError(format!(
                "config validation failed: invalid priority '{}': must be 'high', 'medium', or 'low'",
                self.task.priority
            )));
        }

        for (field, value) in [
            ("task.status", &self.task.status),
            ("actor", &self.actor),
            ("state_file", &self.state_file),
        ] {
            if value.trim().is_empty() {
                return Err(StateError::ConfigError(format!(
                    "config validation failed: {} must be non-empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

fn validate_task_id(field: &str, id: &str) -> Result<()> {
    if TASK_ID_REGEX.is_match(id) {
        Ok(())
    } else {
        Err(StateError::ConfigError(format!(
            "config validation failed: {} '{}' must start with a letter or digit and contain only letters, digits, '.', '_' or '-'",
            field, id
        )))
    }
}
