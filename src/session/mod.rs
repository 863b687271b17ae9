//! Attaching a terminal to a provisioned dev container (`containercraft start`).
//!
//! The container named in the descriptor is started, an interactive shell is
//! opened in it, and once the shell exits the container is stopped. Each
//! step blocks until the runtime process exits.

mod runner;


pub use runner::{CommandRunner, RuntimeCommand, SystemRunner, display_command};

use crate::descriptor::{container_name, parse_descriptor};
use crate::error::{CraftError, Result};
use crate::exit_codes;
use crate::workspace::WorkspaceLayout;

/// Start, attach to and stop the workspace's container.
///
/// Returns the exit code of the interactive shell. The container is stopped
/// even when the shell exits non-zero; a failed start skips both later steps.
pub fn attach(
    layout: &WorkspaceLayout,
    runner: &dyn CommandRunner,
    runtime: &RuntimeCommand,
    shell: &str,
) -> Result<i32> {
    let container = resolve_container(layout)?;

    println!("Starting dev container '{}'...", container);
    let start = runtime.args(["start", container.as_str()]);
    let code = runner.run_interactive(&runtime.program, &start)?;
    ensure_success(runtime, &start, code)?;

    println!(
        "Attaching to '{}'. Exit the shell to stop the container.",
        container
    );
    let exec = runtime.args(["exec", "-it", container.as_str(), shell]);
    let session_code = runner.run_interactive(&runtime.program, &exec)?;

    println!("Stopping dev container '{}'...", container);
    let stop = runtime.args(["stop", container.as_str()]);
    let code = runner.run_interactive(&runtime.program, &stop)?;
    ensure_success(runtime, &stop, code)?;

    println!("Dev container '{}' stopped.", container);

    match session_code {
        Some(code) => Ok(code),
        None => {
            eprintln!("Warning: the shell session was terminated by a signal");
            Ok(exit_codes::EXTERNAL_FAILURE)
        }
    }
}

/// Container name recorded in the workspace's descriptor.
pub fn resolve_container(layout: &WorkspaceLayout) -> Result<String> {
    if !layout.root.is_dir() {
        return Err(CraftError::WorkspaceNotFound(layout.root.clone()));
    }
    if !layout.config_dir.is_dir() {
        return Err(CraftError::DescriptorMissing(layout.config_dir.clone()));
    }

    let path = layout.descriptor_path();
    if !path.is_file() {
        return Err(CraftError::DescriptorMissing(path));
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| CraftError::io(format!("failed to read '{}'", path.display()), e))?;
    let descriptor = parse_descriptor(&text)?;
    container_name(&descriptor)
}

fn ensure_success(runtime: &RuntimeCommand, args: &[String], code: Option<i32>) -> Result<()> {
    match code {
        Some(0) => Ok(()),
        Some(code) => Err(CraftError::ExternalProcessFailure {
            command: display_command(&runtime.program, args),
            reason: format!("exit code {}", code),
        }),
        None => Err(CraftError::ExternalProcessFailure {
            command: display_command(&runtime.program, args),
            reason: "terminated by signal".to_string(),
        }),
    }
}
