//! Typed access and mutation helpers over the raw document.

use super::io::json_kind;
use super::{LAST_UPDATED_AT_KEY, LAST_UPDATED_BY_KEY, NOTES_KEY, StateDocument, TASKS_KEY};
use crate::error::{Result, StateError};
use crate::task::TaskRecord;
use serde_json::{Map, Value};

impl StateDocument {
    /// Check the keys this tool writes to before anything is mutated.
    ///
    /// `tasks` must exist and be an object; `notes`, if present, must be a string.
    pub fn check_shape(&self) -> Result<()> {
        self.tasks()?;
        match self.root.get(NOTES_KEY) {
            None | Some(Value::String(_)) => Ok(()),
            Some(other) => Err(StateError::invalid(
                &self.path,
                format!("\"notes\" must be a string, found {}", json_kind(other)),
            )),
        }
    }

    /// The `tasks` mapping.
    pub fn tasks(&self) -> Result<&Map<String, Value>> {
        match self.root.get(TASKS_KEY) {
            Some(Value::Object(tasks)) => Ok(tasks),
            Some(other) => Err(StateError::invalid(
                &self.path,
                format!("\"tasks\" must be an object, found {}", json_kind(other)),
            )),
            None => Err(StateError::MissingTasks(self.path.clone())),
        }
    }

    fn tasks_mut(&mut self) -> Result<&mut Map<String, Value>> {
        match self.root.get_mut(TASKS_KEY) {
            Some(Value::Object(tasks)) => Ok(tasks),
            Some(other) => Err(StateError::invalid(
                &self.path,
                format!("\"tasks\" must be an object, found {}", json_kind(other)),
            )),
            None => Err(StateError::MissingTasks(self.path.clone())),
        }
    }

    /// Look up one task record by id.
    pub fn task(&self, id: &str) -> Result<Option<&Value>> {
        Ok(self.tasks()?.get(id))
    }

    /// The `endTime` field of a task, if both exist.
    pub fn end_time_of(&self, id: &str) -> Result<Option<&Value>> {
        Ok(self.task(id)?.and_then(|task| task.get("endTime")))
    }

    /// Insert `record` under `id`, replacing any existing record wholesale.
    ///
    /// A replaced record keeps its position in the mapping. Returns the
    /// previous record, if there was one.
    pub fn upsert_task(&mut self, id: &str, record: &TaskRecord) -> Result<Option<Value>> {
        let value = serde_json::to_value(record).map_err(|e| {
            StateError::invalid(
                &self.path,
                format!("failed to serialize task record '{}': {}", id, e),
            )
        })?;
        Ok(self.tasks_mut()?.insert(id.to_string(), value))
    }

    /// Set `lastUpdatedAt` and `lastUpdatedBy`.
    pub fn touch(&mut self, at: &str, by: &str) {
        self.root
            .insert(LAST_UPDATED_AT_KEY.to_string(), Value::String(at.to_string()));
        self.root
            .insert(LAST_UPDATED_BY_KEY.to_string(), Value::String(by.to_string()));
    }

    /// Append `text` to the top-level `notes`, creating it empty first if absent.
    pub fn append_note(&mut self, text: &str) -> Result<()> {
        let notes = self
            .root
            .entry(NOTES_KEY)
            .or_insert_with(|| Value::String(String::new()));

        match notes {
            Value::String(existing) => {
                existing.push_str(text);
                Ok(())
            }
            other => {
                let kind = json_kind(other);
                Err(StateError::invalid(
                    &self.path,
                    format!("\"notes\" must be a string, found {}", kind),
                ))
            }
        }
    }

    /// A string field from the top level, if present and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(Value::as_str)
    }
}
