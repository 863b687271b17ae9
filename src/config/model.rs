//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for containercraft.
///
/// This struct represents the contents of `containercraft.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of template overrides. Unset means the built-in templates.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Container runtime command, split like a shell would (e.g. `sudo docker`).
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Shell launched inside the container by `start`.
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Default answer for the dev container name prompt.
    #[serde(default = "default_name")]
    pub default_name: String,

    /// Whether `create` initializes a git repository in the workspace.
    #[serde(default = "default_true")]
    pub init_git: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: None,
            runtime: default_runtime(),
            shell: default_shell(),
            default_name: default_name(),
            init_git: default_true(),
        }
    }
}
