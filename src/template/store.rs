//! Where templates come from.
//!
//! The default templates are compiled into the binary. A directory of
//! overrides can be configured instead; it must contain every template name
//! the provisioner asks for.

use crate::error::{CraftError, Result};
use crate::fs::{atomic_write, copy_preserving_metadata, set_executable};
use include_dir::{Dir, include_dir};
use std::path::{Path, PathBuf};

static EMBEDDED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Container descriptor template (`{{NAME}}`, `{{PORTS}}`, `{{PY_VER}}`, `{{WORKSPACE}}`).
pub const DESCRIPTOR_TEMPLATE: &str = "devcontainer_template.json";
/// Image build file template (`{{PY_VER}}`).
pub const DOCKERFILE_TEMPLATE: &str = "docker_template";
pub const PRE_COMMIT_TEMPLATE: &str = "pre-commit-config-template.yaml";
pub const GITIGNORE_TEMPLATE: &str = "gitignore_template";
pub const PYPROJECT_TEMPLATE: &str = "pyproject_template.toml";
pub const CI_WORKFLOW_TEMPLATE: &str = "ci_workflow_template.yml";
pub const STARTUP_SCRIPT_TEMPLATE: &str = "startup.sh";

/// Source of template files, passed explicitly to the provisioner.
#[derive(Debug, Clone, Default)]
pub enum TemplateStore {
    /// Templates bundled into the binary at build time.
    #[default]
    Embedded,
    /// Templates read from a directory on disk.
    Directory(PathBuf),
}

impl TemplateStore {
    /// Pick a directory store when a path is configured, otherwise the embedded set.
    pub fn from_dir(dir: Option<&Path>) -> Result<Self> {
        match dir {
            None => Ok(TemplateStore::Embedded),
            Some(path) if path.is_dir() => Ok(TemplateStore::Directory(path.to_path_buf())),
            Some(path) => Err(CraftError::Config(format!(
                "templates directory '{}' does not exist",
                path.display()
            ))),
        }
    }

    /// Read a template as UTF-8 text.
    pub fn read_to_string(&self, name: &str) -> Result<String> {
        match self {
            TemplateStore::Embedded => EMBEDDED_TEMPLATES
                .get_file(name)
                .ok_or_else(|| CraftError::TemplateNotFound(name.to_string()))?
                .contents_utf8()
                .map(str::to_string)
                .ok_or_else(|| {
                    CraftError::InvalidInput(format!("template '{}' is not valid UTF-8", name))
                }),
            TemplateStore::Directory(dir) => {
                let path = self.template_path(dir, name)?;
                std::fs::read_to_string(&path).map_err(|e| {
                    CraftError::io(format!("failed to read template '{}'", path.display()), e)
                })
            }
        }
    }

    /// Copy a template verbatim to `destination`.
    ///
    /// Directory templates keep their permissions and timestamps. Embedded
    /// shell scripts are written executable.
    pub fn copy_to(&self, name: &str, destination: &Path) -> Result<()> {
        match self {
            TemplateStore::Embedded => {
                let file = EMBEDDED_TEMPLATES
                    .get_file(name)
                    .ok_or_else(|| CraftError::TemplateNotFound(name.to_string()))?;
                atomic_write(destination, file.contents())?;
                if name.ends_with(".sh") {
                    set_executable(destination)?;
                }
                Ok(())
            }
            TemplateStore::Directory(dir) => {
                let path = self.template_path(dir, name)?;
                copy_preserving_metadata(&path, destination)
            }
        }
    }

    fn template_path(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CraftError::TemplateNotFound(path.display().to_string()))
        }
    }
}
