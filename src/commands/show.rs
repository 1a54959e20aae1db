//! Implementation of the `collab-state show` command.

use crate::cli::ShowArgs;
use crate::error::{Result, StateError};
use crate::state::{LAST_UPDATED_AT_KEY, LAST_UPDATED_BY_KEY, StateDocument};
use serde_json::Value;
use std::path::Path;

/// Execute the `collab-state show` command.
pub fn cmd_show(state_file: &Path, args: ShowArgs) -> Result<()> {
    let doc = StateDocument::load(state_file)?;

    match args.task_id {
        Some(task_id) => {
            let pretty = task_json(&doc, &task_id)?;
            println!("Task {}:", task_id);
            println!("{}", pretty);
        }
        None => print_summary(&doc)?,
    }

    Ok(())
}

/// One task record, pretty-printed.
fn task_json(doc: &StateDocument, task_id: &str) -> Result<String> {
    let task = doc
        .task(task_id)?
        .ok_or_else(|| StateError::TaskNotFound(task_id.to_string()))?;

    serde_json::to_string_pretty(task)
        .map_err(|e| StateError::invalid(doc.path(), format!("task '{}': {}", task_id, e)))
}

/// Last update metadata plus one line per task.
fn print_summary(doc: &StateDocument) -> Result<()> {
    let tasks = doc.tasks()?;

    println!("State file: {}", doc.path().display());
    println!(
        "Last updated: {} by {}",
        doc.str_field(LAST_UPDATED_AT_KEY).unwrap_or("-"),
        doc.str_field(LAST_UPDATED_BY_KEY).unwrap_or("-")
    );
    println!("Tasks ({}):", tasks.len());

    let id_width = tasks.keys().map(String::len).max().unwrap_or(0);
    for (id, task) in tasks {
        println!("{}", task_line(id, task, id_width));
    }

    Ok(())
}

fn task_line(id: &str, task: &Value, id_width: usize) -> String {
    format!(
        "  {:<id_width$}  {:<11}  {:<6}  {}",
        id,
        field(task, "status"),
        field(task, "priority"),
        field(task, "description"),
    )
}

fn field<'a>(task: &'a Value, key: &str) -> &'a str {
    task.get(key).and_then(Value::as_str).unwrap_or("-")
}
