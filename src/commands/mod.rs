//! Command implementations for collab-state.
//!
//! This module resolves the settings shared by every command (config file
//! and state file path) and routes the parsed command to its handler.

mod record;
mod show;
mod unlock;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Dispatch the parsed CLI to its command implementation.
///
/// Running without a subcommand is the same as `record` with no flags.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let state_file = resolve_state_file(cli.state_file, &config);

    match cli.command.unwrap_or_else(Command::default_command) {
        Command::Record(args) => record::cmd_record(&state_file, config, args),
        Command::Show(args) => show::cmd_show(&state_file, args),
        Command::Unlock(args) => unlock::cmd_unlock(&state_file, &config, args),
    }
}

/// Load the config file if one was given, otherwise use the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// The `--state-file` flag wins over the config file.
fn resolve_state_file(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(&config.state_file))
}
