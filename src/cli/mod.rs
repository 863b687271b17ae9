//! CLI argument parsing for containercraft.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// containercraft: scaffold and enter Python dev containers.
///
/// `create` writes a `.devcontainer/` setup plus project tooling files into a
/// workspace; `start` opens a shell in the container that setup describes.
#[derive(Parser, Debug)]
#[command(name = "containercraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a containercraft.yaml config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for containercraft.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a Dockerfile and dev container configuration for a workspace.
    ///
    /// Missing options are asked for interactively, followed by the
    /// container name, exposed ports and optional Docker access.
    Create(CreateArgs),

    /// Start the dev container, attach a shell, and stop it on exit.
    Start(StartArgs),
}

/// Arguments for the `create` command.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Location of the workspace. Created if it does not exist.
    #[arg(short, long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Python version for the container (e.g. 3.11).
    #[arg(short, long, value_name = "VERSION")]
    pub pyversion: Option<String>,

    /// Path to the requirements file. An empty requirements.txt is written if omitted.
    #[arg(short, long, value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// Directory of template overrides (takes precedence over the config file).
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

/// Arguments for the `start` command.
#[derive(Parser, Debug)]
pub struct StartArgs {
    /// Location of the workspace created with `containercraft create`.
    #[arg(short, long, value_name = "PATH")]
    pub workspace: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
