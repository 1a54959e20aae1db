//! Error types for the collab-state CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for collab-state operations.
///
/// Each variant maps to an exit code via [`StateError::exit_code`].
#[derive(Error, Debug)]
pub enum StateError {
    /// The state file does not exist.
    #[error(
        "File {} not found. Please ensure the collaboration state file exists.",
        .0.display()
    )]
    FileNotFound(PathBuf),

    /// The state file exists but is not valid JSON.
    #[error("Could not decode JSON from {}. Please check its format. ({source})", .path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The state file could not be read for a reason other than being absent.
    #[error("Could not read {}: {message}", .path.display())]
    ReadFailure { path: PathBuf, message: String },

    /// The updated document could not be written back.
    #[error("Could not write to {}: {message}", .path.display())]
    WriteFailure { path: PathBuf, message: String },

    /// The document has no `tasks` mapping to insert into.
    #[error("{} has no \"tasks\" mapping; refusing to guess its structure", .0.display())]
    MissingTasks(PathBuf),

    /// The document parsed but does not have the expected shape.
    #[error("{}: {message}", .path.display())]
    InvalidDocument { path: PathBuf, message: String },

    /// A task lookup named an identifier the document does not contain.
    #[error("task '{0}' not found in state file")]
    TaskNotFound(String),

    /// The config file is unreadable or holds invalid values.
    #[error("{0}")]
    ConfigError(String),

    /// The lock next to the state file could not be acquired or cleared.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),
}

impl StateError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StateError::LockError(_) => exit_codes::LOCK_FAILURE,
            StateError::FileNotFound(_)
            | StateError::MalformedDocument { .. }
            | StateError::ReadFailure { .. }
            | StateError::WriteFailure { .. }
            | StateError::MissingTasks(_)
            | StateError::InvalidDocument { .. }
            | StateError::TaskNotFound(_)
            | StateError::ConfigError(_) => exit_codes::STATE_ERROR,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        StateError::InvalidDocument {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for collab-state operations.
pub type Result<T> = std::result::Result<T, StateError>;
