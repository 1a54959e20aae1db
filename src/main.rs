//! collab-state: record task completions in a JSON collaboration state file.
//!
//! This is the main entry point for the `collab-state` CLI. It parses
//! arguments, dispatches to the command handler, and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod locks;
pub mod state;
pub mod task;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Errors go to stdout alongside the status lines.
            println!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
