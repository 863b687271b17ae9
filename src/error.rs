//! Error types for the containercraft CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for containercraft operations.
///
/// Each variant maps to one of the exit codes in [`crate::exit_codes`].
#[derive(Error, Debug)]
pub enum CraftError {
    /// The caller supplied a value that cannot be used (bad port, missing file).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The workspace already has a descriptor; nothing was changed.
    #[error(
        "devcontainer already exists at '{}'. Remove the existing .devcontainer/devcontainer.json before running create again",
        .0.display()
    )]
    DescriptorAlreadyExists(PathBuf),

    #[error("workspace '{}' not found", .0.display())]
    WorkspaceNotFound(PathBuf),

    #[error(
        "no devcontainer configuration found at '{}'. Run `containercraft create` first",
        .0.display()
    )]
    DescriptorMissing(PathBuf),

    /// The descriptor could not be parsed or lacks a field we rely on.
    #[error("malformed devcontainer descriptor: {0}")]
    MalformedDescriptor(String),

    /// An external process (git, container runtime) failed or could not start.
    #[error("{command} failed: {reason}")]
    ExternalProcessFailure { command: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    #[error("config error: {0}")]
    Config(String),

    /// Reading an answer from the terminal failed.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl CraftError {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CraftError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CraftError::InvalidInput(_)
            | CraftError::DescriptorAlreadyExists(_)
            | CraftError::WorkspaceNotFound(_)
            | CraftError::DescriptorMissing(_)
            | CraftError::MalformedDescriptor(_)
            | CraftError::Template(_)
            | CraftError::TemplateNotFound(_)
            | CraftError::Config(_)
            | CraftError::Prompt(_) => exit_codes::USER_ERROR,
            CraftError::Io { .. } => exit_codes::IO_FAILURE,
            CraftError::ExternalProcessFailure { .. } => exit_codes::EXTERNAL_FAILURE,
        }
    }
}

/// Result type alias for containercraft operations.
pub type Result<T> = std::result::Result<T, CraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_and_descriptor_errors_exit_with_one() {
        let err = CraftError::WorkspaceNotFound(PathBuf::from("/nope"));
        assert_eq!(err.exit_code(), 1);

        let err = CraftError::DescriptorMissing(PathBuf::from("/ws/.devcontainer"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn refusal_is_a_user_error() {
        let err = CraftError::DescriptorAlreadyExists(PathBuf::from("/ws/.devcontainer"));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = CraftError::io(
            "failed to write 'x'",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
        assert_eq!(err.to_string(), "failed to write 'x': denied");
    }

    #[test]
    fn external_failure_has_correct_exit_code() {
        let err = CraftError::ExternalProcessFailure {
            command: "docker start demo".to_string(),
            reason: "exit code 1".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::EXTERNAL_FAILURE);
        assert_eq!(err.to_string(), "docker start demo failed: exit code 1");
    }

    #[test]
    fn template_errors_convert() {
        let err: CraftError = TemplateError::UnusedToken {
            name: "NAME".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("NAME"));
    }
}
