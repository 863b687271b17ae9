//! Git command runner for containercraft.
//!
//! Provisioning only needs to create repositories, but all git invocations
//! still go through [`run_git`] so failures are reported uniformly.

use crate::error::{CraftError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(CraftError::ExternalProcessFailure)` - If git cannot be spawned or exits non-zero
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let display = format!("git {}", args.first().unwrap_or(&""));

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| CraftError::ExternalProcessFailure {
            command: display.clone(),
            reason: format!("could not execute git: {} (is git installed?)", e),
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(CraftError::ExternalProcessFailure {
            command: display,
            reason: format!("exit code {}: {}", exit_code, error_msg),
        })
    }
}

/// Initialize an empty repository in `dir`.
pub fn init_repository<P: AsRef<Path>>(dir: P) -> Result<()> {
    run_git(dir, &["init"])?;
    Ok(())
}

/// Whether `dir` already holds its own git metadata (`dir/.git`).
///
/// Only the directory itself is checked; being nested inside another
/// repository does not count.
pub fn has_git_metadata<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().join(".git").exists()
}
