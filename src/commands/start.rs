//! Implementation of the `containercraft start` command.

use crate::cli::StartArgs;
use crate::config::Config;
use crate::error::Result;
use crate::session::{SystemRunner, attach};
use crate::workspace::WorkspaceLayout;

/// Start the workspace's container, attach a shell, stop it afterwards.
pub fn cmd_start(args: StartArgs, config: &Config) -> Result<i32> {
    let runtime = config.runtime_command()?;
    let layout = WorkspaceLayout::new(&args.workspace);
    attach(&layout, &SystemRunner, &runtime, &config.shell)
}
