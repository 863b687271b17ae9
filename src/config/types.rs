//! Constants and default value functions used by the Config struct.

/// Config file picked up from the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "containercraft.yaml";

pub(super) fn default_runtime() -> String {
    "docker".to_string()
}

pub(super) fn default_shell() -> String {
    "/bin/bash".to_string()
}

pub(super) fn default_name() -> String {
    "Python Dev Container".to_string()
}

pub(super) fn default_true() -> bool {
    true
}
