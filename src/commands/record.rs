//! Implementation of the `collab-state record` command.
//!
//! Load -> pick start time -> insert record and update metadata -> save ->
//! print the file back. The lock (when taken) covers everything up to and
//! including the event log append; verification happens after release.

use crate::cli::RecordArgs;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::locks;
use crate::state::StateDocument;
use crate::task::{TaskRecord, format_timestamp, resolve_start_time};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// What a record run did, for reporting and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recorded {
    pub task_id: String,
    pub start_time: String,
    pub end_time: String,
    /// A record already existed under `task_id` and was overwritten.
    pub replaced: bool,
}

/// Run-level switches resolved from flags and config.
#[derive(Debug, Clone)]
pub(crate) struct RecordOptions {
    pub lock: bool,
    pub verify: bool,
    pub event_log: Option<PathBuf>,
}

/// Execute the `collab-state record` command.
pub fn cmd_record(state_file: &Path, mut config: Config, args: RecordArgs) -> Result<()> {
    apply_overrides(&mut config, &args)?;

    let options = RecordOptions {
        lock: !args.no_lock,
        verify: !args.no_verify,
        event_log: args
            .event_log
            .or_else(|| config.event_log.as_ref().map(PathBuf::from)),
    };

    run_record(state_file, &config, &options, Utc::now()).map(|_| ())
}

/// Apply `--task-id` / `--actor` on top of the config and re-validate.
fn apply_overrides(config: &mut Config, args: &RecordArgs) -> Result<()> {
    if let Some(task_id) = &args.task_id {
        config.task.id = task_id.clone();
    }
    if let Some(actor) = &args.actor {
        config.actor = actor.clone();
    }
    config.validate()
}

/// The full record flow against `state_file`, stamped with `now`.
pub(crate) fn run_record(
    state_file: &Path,
    config: &Config,
    options: &RecordOptions,
    now: DateTime<Utc>,
) -> Result<Recorded> {
    run_record_with(state_file, config, options, now, |path| std::fs::read_to_string(path))
}

/// [`run_record`] with the verification read supplied by the caller.
fn run_record_with(
    state_file: &Path,
    config: &Config,
    options: &RecordOptions,
    now: DateTime<Utc>,
    read_back: impl FnOnce(&Path) -> io::Result<String>,
) -> Result<Recorded> {
    let lock = if options.lock {
        Some(locks::acquire_state_lock(state_file, "record")?)
    } else {
        None
    };

    let mut doc = StateDocument::load(state_file)?;
    let recorded = apply_record(&mut doc, config, now)?;
    doc.save()?;

    println!("{}", report_line(state_file, &recorded, &config.task.label));

    if let Some(log_path) = &options.event_log {
        let event = Event::new(EventAction::Record)
            .with_timestamp(now)
            .with_task(&recorded.task_id)
            .with_details(json!({
                "state_file": state_file.display().to_string(),
                "description": config.task.description,
                "start_time": recorded.start_time,
                "end_time": recorded.end_time,
                "replaced": recorded.replaced,
                "last_updated_by": config.actor,
            }));
        // The save already happened; audit failures only warn.
        if let Err(e) = append_event(log_path, &event) {
            eprintln!("Warning: {}", e);
        }
    }

    if let Some(lock) = lock
        && let Err(e) = lock.release()
    {
        eprintln!("Warning: {}", e);
    }

    if options.verify {
        print_verification(state_file, read_back);
    }

    Ok(recorded)
}

/// Apply the configured record to an in-memory document.
///
/// The document's shape is checked before anything changes, so an error
/// leaves `doc` untouched.
pub(crate) fn apply_record(
    doc: &mut StateDocument,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<Recorded> {
    doc.check_shape()?;

    let now = format_timestamp(now);
    let start_time = resolve_start_time(doc.end_time_of(&config.prior_task_id)?, &now);

    let record = TaskRecord::from_template(&config.task, start_time.clone(), now.clone());
    let previous = doc.upsert_task(&config.task.id, &record)?;

    doc.touch(&now, &config.actor);
    doc.append_note(&config.rendered_state_note())?;

    Ok(Recorded {
        task_id: config.task.id.clone(),
        start_time,
        end_time: now,
        replaced: previous.is_some(),
    })
}

/// `Updated <path> with new task <id> for <label>.`, without the `for` part
/// when the label is empty.
fn report_line(state_file: &Path, recorded: &Recorded, label: &str) -> String {
    let label = label.trim();
    if label.is_empty() {
        format!(
            "Updated {} with new task {}.",
            state_file.display(),
            recorded.task_id
        )
    } else {
        format!(
            "Updated {} with new task {} for {}.",
            state_file.display(),
            recorded.task_id,
            label
        )
    }
}

/// Re-read the saved file and print it. Failures are reported, never returned.
fn print_verification(state_file: &Path, read_back: impl FnOnce(&Path) -> io::Result<String>) {
    match read_back(state_file) {
        Ok(content) => {
            println!("Verification - Content of updated file:");
            println!("{}", content);
        }
        Err(e) => println!("Error: {}", verification_error(state_file, &e)),
    }
}

fn verification_error(state_file: &Path, e: &io::Error) -> String {
    match e.kind() {
        ErrorKind::NotFound => format!(
            "Verification failed. File {} not found after writing.",
            state_file.display()
        ),
        _ => format!(
            "Could not read {} for verification: {}",
            state_file.display(),
            e
        ),
    }
}
