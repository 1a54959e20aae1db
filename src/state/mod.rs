//! The collaboration state document.
//!
//! The document is a JSON object kept as an order-preserving
//! `serde_json::Map`, so fields this tool never touches are written back
//! exactly as they were read, in the same order. Only these keys are
//! interpreted:
//!
//! - `tasks`: object mapping task id to task record
//! - `lastUpdatedAt` / `lastUpdatedBy`: last modification metadata
//! - `notes`: free text, appended to on every recorded task
//!
//! # Lifecycle
//!
//! ```text
//! StateDocument::load(path)  ->  mutate in memory  ->  save(path)
//! ```
//!
//! The whole document is rewritten on save; there is no partial update.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

mod io;
mod mutations;

pub const TASKS_KEY: &str = "tasks";
pub const LAST_UPDATED_AT_KEY: &str = "lastUpdatedAt";
pub const LAST_UPDATED_BY_KEY: &str = "lastUpdatedBy";
pub const NOTES_KEY: &str = "notes";

/// A loaded state document together with the path it came from.
#[derive(Debug, Clone)]
pub struct StateDocument {
    path: PathBuf,
    root: Map<String, Value>,
}

impl StateDocument {
    /// Path the document was loaded from (and will be saved to).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw top-level object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }
}
