//! Command implementations for containercraft.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod create;
mod start;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{CraftError, Result};
use crate::exit_codes;

/// Dispatch a command to its implementation.
///
/// Loads the configuration first, then returns the process exit code on
/// success: always 0 for `create`, the shell's exit code for `start`.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir()
        .map_err(|e| CraftError::io("failed to get current working directory", e))?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Create(args) => {
            create::cmd_create(args, &config)?;
            Ok(exit_codes::SUCCESS)
        }
        Command::Start(args) => start::cmd_start(args, &config),
    }
}
