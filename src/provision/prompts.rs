//! Interactive questions asked during `create`.

use crate::descriptor::Capability;
use crate::error::{CraftError, Result};

/// Source of answers to the `create` questions.
pub trait Prompter {
    /// Ask for a line of text. An empty answer yields `default`.
    fn input(&mut self, prompt: &str, default: &str) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter that asks on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        let mut question = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            question = question.default(default.to_string());
        }
        let answer = question
            .interact_text()
            .map_err(|e| CraftError::Prompt(e.to_string()))?;

        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| CraftError::Prompt(e.to_string()))
    }
}

/// Answers that shape the generated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentOptions {
    pub name: String,
    pub ports: Vec<u16>,
    pub capability: Option<Capability>,
}

pub(crate) const NAME_PROMPT: &str = "Enter the name of the dev container";
pub(crate) const PORTS_PROMPT: &str =
    "Enter the ports to expose (comma separated). If none, press enter";
pub(crate) const DOCKER_PROMPT: &str = "Enable Docker access inside the dev container?";
pub(crate) const DOCKER_VARIANT_PROMPT: &str =
    "Docker access mode: [1] docker-in-docker, [2] docker-outside-of-docker";

/// Ask for the display name, ports and optional Docker capability.
///
/// All questions are asked before anything is written, so a bad answer
/// leaves the workspace untouched.
pub fn collect_options(prompter: &mut dyn Prompter, default_name: &str) -> Result<EnvironmentOptions> {
    let mut name = prompter.input(NAME_PROMPT, default_name)?;
    if name.trim().is_empty() {
        name = default_name.to_string();
    }

    let ports = parse_ports(&prompter.input(PORTS_PROMPT, "")?)?;

    let capability = if prompter.confirm(DOCKER_PROMPT, false)? {
        let choice = prompter.input(DOCKER_VARIANT_PROMPT, "1")?;
        Some(Capability::from_choice(&choice))
    } else {
        None
    };

    Ok(EnvironmentOptions {
        name,
        ports,
        capability,
    })
}

/// Parse a comma separated port list. Blank input means no ports.
pub fn parse_ports(input: &str) -> Result<Vec<u16>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<u16>().map_err(|_| {
                CraftError::InvalidInput(format!(
                    "'{}' is not a valid port number (expected 0-65535)",
                    token
                ))
            })
        })
        .collect()
}
