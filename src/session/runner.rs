//! External process invocation.
//!
//! Commands are always built as argument vectors and handed to the OS
//! directly; nothing is ever passed through a shell.

use crate::error::{CraftError, Result};
use std::process::Command;

/// Runs a program attached to the caller's terminal and waits for it to exit.
pub trait CommandRunner {
    /// Run `program` with `args`, inheriting stdin/stdout/stderr.
    ///
    /// Returns the exit code, or `None` when the process was terminated by a
    /// signal. Failing to spawn is an error.
    fn run_interactive(&self, program: &str, args: &[String]) -> Result<Option<i32>>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_interactive(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        let status = Command::new(program).args(args).status().map_err(|e| {
            CraftError::ExternalProcessFailure {
                command: display_command(program, args),
                reason: format!("could not execute '{}': {}", program, e),
            }
        })?;
        Ok(status.code())
    }
}

/// The container runtime program plus any leading arguments, e.g.
/// `sudo docker` becomes program `sudo` with prefix `["docker"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCommand {
    pub program: String,
    pub prefix_args: Vec<String>,
}

impl RuntimeCommand {
    /// Split a configured runtime string into words.
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = shell_words::split(command).map_err(|e| {
            CraftError::Config(format!(
                "failed to parse runtime command '{}': {}",
                command, e
            ))
        })?;

        if words.is_empty() {
            return Err(CraftError::Config(
                "config validation failed: runtime must not be empty".to_string(),
            ));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            prefix_args: words,
        })
    }

    /// Full argument list for a runtime subcommand.
    pub fn args<I, S>(&self, rest: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args
            .iter()
            .cloned()
            .chain(rest.into_iter().map(Into::into))
            .collect()
    }
}

/// Render a command for messages, quoting where a shell would need it.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(program);
    words.extend(args.iter().map(String::as_str));
    shell_words::join(words)
}
