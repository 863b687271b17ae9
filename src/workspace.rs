//! Workspace path resolution.
//!
//! Every command locates the files it reads or writes through
//! [`WorkspaceLayout`], so the on-disk layout is defined in one place:
//!
//! ```text
//! <workspace>/
//!   .devcontainer/
//!     devcontainer.json
//!     Dockerfile
//!     startup.sh
//!   .github/workflows/ci.yml
//!   .gitignore
//!   .pre-commit-config.yaml
//!   pyproject.toml
//!   requirements.txt        (or the copied manifest)
//! ```

use std::path::{Path, PathBuf};

/// Configuration subdirectory name.
pub const CONFIG_DIR: &str = ".devcontainer";

/// Descriptor file name inside [`CONFIG_DIR`].
pub const DESCRIPTOR_FILE: &str = "devcontainer.json";

/// Manifest written when the caller supplies none.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Resolved paths for one workspace. Building a layout never touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    /// Workspace root as given by the caller.
    pub root: PathBuf,

    /// `{root}/.devcontainer/`
    pub config_dir: PathBuf,
}

impl WorkspaceLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let config_dir = root.join(CONFIG_DIR);
        Self { root, config_dir }
    }

    /// Base name of the workspace directory, used to name the container.
    ///
    /// Falls back to the last normal component of the absolute path when the
    /// given path has none (for example `.`).
    pub fn base_name(&self) -> String {
        if let Some(name) = self.root.file_name() {
            return name.to_string_lossy().into_owned();
        }
        std::path::absolute(&self.root)
            .ok()
            .and_then(|abs| {
                abs.components()
                    .filter_map(|c| match c {
                        std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .next_back()
            })
            .unwrap_or_default()
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.config_dir.join(DESCRIPTOR_FILE)
    }

    pub fn dockerfile_path(&self) -> PathBuf {
        self.config_dir.join("Dockerfile")
    }

    pub fn startup_script_path(&self) -> PathBuf {
        self.config_dir.join("startup.sh")
    }

    pub fn default_manifest_path(&self) -> PathBuf {
        self.root.join(DEFAULT_MANIFEST)
    }

    pub fn pre_commit_path(&self) -> PathBuf {
        self.root.join(".pre-commit-config.yaml")
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    pub fn pyproject_path(&self) -> PathBuf {
        self.root.join("pyproject.toml")
    }

    pub fn ci_workflow_path(&self) -> PathBuf {
        self.root.join(".github").join("workflows").join("ci.yml")
    }
}
