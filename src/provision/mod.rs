//! Workspace provisioning behind `containercraft create`.
//!
//! # What provisioning does
//!
//! 1. Creates the workspace (and a git repository) if needed
//! 2. Creates `.devcontainer/`, refusing to continue if a descriptor exists
//! 3. Asks for the container name, ports and optional Docker access
//! 4. Renders `devcontainer.json`, adding the Docker feature if requested
//! 5. Writes or copies the requirements file
//! 6. Copies the auxiliary templates (pre-commit, gitignore, pyproject, CI, startup script)
//! 7. Renders the Dockerfile
//!
//! Nothing is rolled back if a later step fails. Every file written so far
//! is recorded in the [`ProvisionReport`] so the caller can tell the user
//! exactly what was left behind.

pub mod prompts;


use crate::config::Config;
use crate::descriptor::{
    Capability, DescriptorParams, inject_capability, parse_descriptor, render_descriptor,
    to_pretty_json,
};
use crate::error::{CraftError, Result};
use crate::fs::{atomic_write_file, copy_preserving_metadata, ensure_dir};
use crate::git;
use crate::template::store::{
    CI_WORKFLOW_TEMPLATE, DESCRIPTOR_TEMPLATE, DOCKERFILE_TEMPLATE, GITIGNORE_TEMPLATE,
    PRE_COMMIT_TEMPLATE, PYPROJECT_TEMPLATE, STARTUP_SCRIPT_TEMPLATE,
};
use crate::template::{TemplateStore, render_template, tokens};
use crate::workspace::WorkspaceLayout;
use std::path::{Path, PathBuf};

pub use prompts::{EnvironmentOptions, Prompter, TerminalPrompter};

/// What the caller asked to provision.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub workspace: PathBuf,
    /// Python version, e.g. `3.11`.
    pub runtime_version: String,
    /// Requirements file to copy; `None` writes an empty `requirements.txt`.
    pub manifest: Option<PathBuf>,
}

/// A file written into the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFile {
    pub label: &'static str,
    pub path: PathBuf,
}

/// Record of what a provisioning run did, filled in as it goes.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub workspace_created: bool,
    pub git_initialized: bool,
    pub capability: Option<Capability>,
    pub files: Vec<CreatedFile>,
}

impl ProvisionReport {
    fn record(&mut self, label: &'static str, path: PathBuf) {
        self.files.push(CreatedFile { label, path });
    }
}

/// Populates a workspace from templates.
pub struct Provisioner<'a> {
    templates: &'a TemplateStore,
    config: &'a Config,
}

impl<'a> Provisioner<'a> {
    pub fn new(templates: &'a TemplateStore, config: &'a Config) -> Self {
        Self { templates, config }
    }

    /// Provision `request.workspace`.
    ///
    /// Returns `DescriptorAlreadyExists` without touching any file if the
    /// workspace already has a descriptor.
    pub fn provision(
        &self,
        request: &ProvisionRequest,
        prompter: &mut dyn Prompter,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let runtime_version = request.runtime_version.trim();
        if runtime_version.is_empty() {
            return Err(CraftError::InvalidInput(
                "python version must not be empty".to_string(),
            ));
        }

        let layout = WorkspaceLayout::new(&request.workspace);

        self.prepare_workspace(&layout, report)?;
        ensure_config_dir(&layout)?;

        let options = prompts::collect_options(prompter, &self.config.default_name)?;
        let manifest = request.manifest.as_deref().map(resolve_manifest).transpose()?;

        self.write_descriptor(&layout, runtime_version, &options, report)?;
        write_manifest(&layout, manifest.as_deref(), report)?;
        self.copy_auxiliary_files(&layout, report)?;
        self.write_dockerfile(&layout, runtime_version, report)?;

        Ok(())
    }

    /// Create the workspace directory and its git repository when missing.
    fn prepare_workspace(&self, layout: &WorkspaceLayout, report: &mut ProvisionReport) -> Result<()> {
        if !layout.root.exists() {
            println!(
                "Workspace {} not found. Creating workspace...",
                layout.root.display()
            );
            ensure_dir(&layout.root)?;
            report.workspace_created = true;
        } else if !layout.root.is_dir() {
            return Err(CraftError::InvalidInput(format!(
                "workspace '{}' exists but is not a directory",
                layout.root.display()
            )));
        } else {
            println!("Workspace {} found. Proceeding...", layout.root.display());
        }

        if !self.config.init_git {
            return Ok(());
        }

        if git::has_git_metadata(&layout.root) {
            println!("Directory is already a git repository. Skipping git initialization.");
        } else {
            println!("Initializing git repository...");
            git::init_repository(&layout.root)?;
            report.git_initialized = true;
        }

        Ok(())
    }

    fn write_descriptor(
        &self,
        layout: &WorkspaceLayout,
        runtime_version: &str,
        options: &EnvironmentOptions,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let template = self.templates.read_to_string(DESCRIPTOR_TEMPLATE)?;
        let params = DescriptorParams {
            name: options.name.clone(),
            ports: options.ports.clone(),
            runtime_version: runtime_version.to_string(),
            workspace: layout.base_name(),
        };

        let rendered = render_descriptor(&template, &params)?;
        // Parse even when unchanged so a broken template fails before writing.
        let mut descriptor = parse_descriptor(&rendered).map_err(|e| {
            CraftError::MalformedDescriptor(format!(
                "template '{}' did not render to valid JSON ({})",
                DESCRIPTOR_TEMPLATE, e
            ))
        })?;

        let content = match options.capability {
            Some(capability) => {
                inject_capability(&mut descriptor, capability)?;
                report.capability = Some(capability);
                to_pretty_json(&descriptor)?
            }
            None => rendered,
        };

        let path = layout.descriptor_path();
        atomic_write_file(&path, &content)?;
        report.record("Dev container config", path);
        Ok(())
    }

    fn copy_auxiliary_files(&self, layout: &WorkspaceLayout, report: &mut ProvisionReport) -> Result<()> {
        let copies: [(&str, &'static str, PathBuf); 5] = [
            (PRE_COMMIT_TEMPLATE, "Pre-commit config", layout.pre_commit_path()),
            (GITIGNORE_TEMPLATE, "Git ignore rules", layout.gitignore_path()),
            (PYPROJECT_TEMPLATE, "Project config", layout.pyproject_path()),
            (CI_WORKFLOW_TEMPLATE, "CI workflow", layout.ci_workflow_path()),
            (STARTUP_SCRIPT_TEMPLATE, "Startup script", layout.startup_script_path()),
        ];

        for (template, label, destination) in copies {
            self.templates.copy_to(template, &destination)?;
            report.record(label, destination);
        }
        Ok(())
    }

    fn write_dockerfile(
        &self,
        layout: &WorkspaceLayout,
        runtime_version: &str,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let template = self.templates.read_to_string(DOCKERFILE_TEMPLATE)?;
        let content = render_template(&template, &tokens([("PY_VER", runtime_version)]))?;

        let path = layout.dockerfile_path();
        atomic_write_file(&path, &content)?;
        report.record("Dockerfile", path);
        Ok(())
    }
}

/// Create `.devcontainer/`; refuse if it already holds a descriptor.
fn ensure_config_dir(layout: &WorkspaceLayout) -> Result<()> {
    let descriptor = layout.descriptor_path();
    if descriptor.exists() {
        return Err(CraftError::DescriptorAlreadyExists(descriptor));
    }
    ensure_dir(&layout.config_dir)
}

/// Absolute path of an existing manifest file.
fn resolve_manifest(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| {
        CraftError::InvalidInput(format!(
            "cannot resolve requirements file '{}': {}",
            path.display(),
            e
        ))
    })?;

    if !absolute.is_file() {
        return Err(CraftError::InvalidInput(format!(
            "requirements file '{}' not found",
            absolute.display()
        )));
    }
    Ok(absolute)
}

fn write_manifest(
    layout: &WorkspaceLayout,
    manifest: Option<&Path>,
    report: &mut ProvisionReport,
) -> Result<()> {
    let Some(source) = manifest else {
        let path = layout.default_manifest_path();
        atomic_write_file(&path, "")?;
        report.record("Requirements", path);
        return Ok(());
    };

    let file_name = source.file_name().ok_or_else(|| {
        CraftError::InvalidInput(format!(
            "requirements path '{}' has no file name",
            source.display()
        ))
    })?;
    let destination = layout.root.join(file_name);

    if !is_same_file(source, &destination) {
        copy_preserving_metadata(source, &destination)?;
    }
    report.record("Requirements", destination);
    Ok(())
}

/// Copying a file onto itself would truncate it.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
