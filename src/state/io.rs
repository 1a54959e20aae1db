//! Loading and saving the state document.

use super::StateDocument;
use crate::error::{Result, StateError};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

impl StateDocument {
    /// Load and parse the state file.
    ///
    /// # Returns
    ///
    /// * `Err(StateError::FileNotFound)` - Nothing exists at `path`
    /// * `Err(StateError::ReadFailure)` - The file exists but cannot be read
    /// * `Err(StateError::MalformedDocument)` - The content is not valid JSON
    /// * `Err(StateError::InvalidDocument)` - Valid JSON, but not an object
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StateError::FileNotFound(path.to_path_buf()),
            _ => StateError::ReadFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        Self::parse(path, &content)
    }

    /// Parse document content as if it had been read from `path`.
    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let value: Value =
            serde_json::from_str(content).map_err(|source| StateError::MalformedDocument {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            other => Err(StateError::invalid(
                path,
                format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                ),
            )),
        }
    }

    /// Serialize the document pretty-printed with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut output =
            serde_json::to_string_pretty(&self.root).map_err(|e| StateError::WriteFailure {
                path: self.path.clone(),
                message: format!("failed to serialize state document: {}", e),
            })?;
        output.push('\n');
        Ok(output)
    }

    /// Atomically write the whole document back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_json()?;
        crate::fs::atomic_write_file(&self.path, &content)
    }
}

/// Human-readable name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
