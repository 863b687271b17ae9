//! Implementation of the `containercraft create` command.
//!
//! Workspace path and Python version fall back to interactive prompts when
//! not given on the command line. The rest of the work is done by the
//! [`Provisioner`].

use crate::cli::CreateArgs;
use crate::config::Config;
use crate::error::{CraftError, Result};
use crate::provision::{
    Prompter, ProvisionReport, ProvisionRequest, Provisioner, TerminalPrompter,
};
use crate::template::TemplateStore;
use crate::workspace::DEFAULT_MANIFEST;
use std::path::PathBuf;

pub(crate) const WORKSPACE_PROMPT: &str = "Workspace location";
pub(crate) const PYVERSION_PROMPT: &str = "Python version";

/// Execute the `containercraft create` command.
pub fn cmd_create(args: CreateArgs, config: &Config) -> Result<()> {
    run_create(args, config, &mut TerminalPrompter)
}

pub(crate) fn run_create(
    args: CreateArgs,
    config: &Config,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let workspace = match args.workspace {
        Some(path) => path,
        None => PathBuf::from(required_answer(prompter, WORKSPACE_PROMPT)?),
    };
    let runtime_version = match args.pyversion {
        Some(version) => version,
        None => required_answer(prompter, PYVERSION_PROMPT)?,
    };

    let store = match args.templates.as_deref() {
        Some(dir) => TemplateStore::from_dir(Some(dir))?,
        None => config.template_store()?,
    };

    let manifest_name = args
        .requirements
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| DEFAULT_MANIFEST.to_string());
    println!(
        "Creating Dockerfile for Python {} and requirements file {}",
        runtime_version.trim(),
        manifest_name
    );

    let request = ProvisionRequest {
        workspace,
        runtime_version,
        manifest: args.requirements,
    };

    let mut report = ProvisionReport::default();
    if let Err(e) = Provisioner::new(&store, config).provision(&request, prompter, &mut report) {
        warn_partial(&report);
        return Err(e);
    }

    print_summary(&request, &report);
    Ok(())
}

fn required_answer(prompter: &mut dyn Prompter, prompt: &str) -> Result<String> {
    let answer = prompter.input(prompt, "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(CraftError::InvalidInput(format!(
            "{} must not be empty",
            prompt.to_lowercase()
        )));
    }
    Ok(answer.to_string())
}

fn warn_partial(report: &ProvisionReport) {
    if report.files.is_empty() {
        return;
    }
    eprintln!("Warning: provisioning stopped part way; these files were already written:");
    for file in &report.files {
        eprintln!("  {}", file.path.display());
    }
}

fn print_summary(request: &ProvisionRequest, report: &ProvisionReport) {
    println!();
    if report.workspace_created {
        println!("Created workspace {}", request.workspace.display());
    }
    println!("Dev container created in {}", request.workspace.display());
    if report.git_initialized {
        println!("Initialized an empty git repository.");
    }
    if let Some(capability) = report.capability {
        println!("Docker access: {}", capability.feature_id());
    }
    println!();
    println!("Created files:");
    for file in &report.files {
        println!("  {:<22} {}", file.label, file.path.display());
    }
    println!();
    println!(
        "Open the workspace with the VS Code Dev Containers extension, \
         or run `containercraft start -w {}` once the container is built.",
        request.workspace.display()
    );
}
