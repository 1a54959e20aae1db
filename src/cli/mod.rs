//! CLI argument parsing for collab-state.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// collab-state: record task completions in a JSON collaboration state file.
///
/// With no arguments, records the configured task (by default task 1.6) in
/// `aideator-app/collaboration_state.json` and prints the updated file.
#[derive(Parser, Debug)]
#[command(name = "collab-state")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// State file to operate on (overrides the config file).
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// YAML config describing the task record to write.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for collab-state.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record the configured task in the state file (the default command).
    ///
    /// Loads the file, inserts the task record, updates lastUpdatedAt/By,
    /// appends to notes, writes the file back, and prints it for verification.
    Record(RecordArgs),

    /// Show the state file summary, or one task record.
    Show(ShowArgs),

    /// Remove a lock left behind by an interrupted run.
    Unlock(UnlockArgs),
}

impl Command {
    /// The command run when none is given.
    pub fn default_command() -> Self {
        Command::Record(RecordArgs::default())
    }
}

/// Arguments for the `record` command.
#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    /// Task identifier to write (overrides the config file).
    #[arg(long)]
    pub task_id: Option<String>,

    /// Value for lastUpdatedBy (overrides the config file).
    #[arg(long)]
    pub actor: Option<String>,

    /// Append an NDJSON event to this file after saving.
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Skip printing the file back after writing it.
    #[arg(long)]
    pub no_verify: bool,

    /// Do not take the lock next to the state file.
    #[arg(long)]
    pub no_lock: bool,
}

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task ID to show (e.g., 1.6). If omitted, shows a summary.
    pub task_id: Option<String>,
}

/// Arguments for the `unlock` command.
#[derive(Args, Debug)]
pub struct UnlockArgs {
    /// Remove the lock even if it is not yet stale.
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
