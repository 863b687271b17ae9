//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::error::{CraftError, Result};
use crate::session::RuntimeCommand;
use crate::template::TemplateStore;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// A relative `templates_dir` is resolved against the directory holding
    /// the config file, so a project can ship its templates next to it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CraftError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&content)?;
        if let Some(dir) = &config.templates_dir
            && dir.is_relative()
            && let Some(parent) = path.parent()
        {
            config.templates_dir = Some(parent.join(dir));
        }
        Ok(config)
    }

    /// Resolve the config for this invocation.
    ///
    /// An explicit path must exist. Without one, `containercraft.yaml` in
    /// `cwd` is used when present; otherwise defaults apply.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| CraftError::Config(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `runtime` must split into at least one word
    /// - `shell` and `default_name` must be non-empty
    pub fn validate(&self) -> Result<()> {
        self.runtime_command()?;

        if self.shell.trim().is_empty() {
            return Err(CraftError::Config(
                "config validation failed: shell must not be empty".to_string(),
            ));
        }

        if self.default_name.trim().is_empty() {
            return Err(CraftError::Config(
                "config validation failed: default_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The container runtime invocation prefix.
    pub fn runtime_command(&self) -> Result<RuntimeCommand> {
        RuntimeCommand::parse(&self.runtime)
    }

    /// The template source named by `templates_dir`.
    pub fn template_store(&self) -> Result<TemplateStore> {
        TemplateStore::from_dir(self.templates_dir.as_deref())
    }
}
