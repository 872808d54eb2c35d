//! Application layer errors.
//!
//! These errors represent failures in orchestration and external
//! collaborators, not business logic. Business logic errors are
//! `DomainError` from `crate::domain`.
//!
//! Only `TemplateNotFound` and `PackageInstallFailed` carry distinguishing
//! message content; everything else that escapes the pipeline mid-run is
//! eventually reported as a generation abort.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during generation orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The requested sub-template is absent from the installed package.
    ///
    /// The message enumerates every currently available sub-template name
    /// (sorted) so the caller can suggest alternatives.
    #[error(
        "Template '{requested}' not found in the installed package. Available templates: {}",
        .available.join(", ")
    )]
    TemplateNotFound {
        requested: String,
        available: Vec<String>,
    },

    /// The external package installer failed (network, permission, timeout).
    ///
    /// `output` is the underlying tool's raw text, passed through
    /// unmodified. There is no retry.
    #[error("Package installation failed: {output}")]
    PackageInstallFailed { output: String },

    /// An external command exceeded its deadline.
    #[error("Command '{command}' timed out after {timeout_secs}s")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    /// An external command could not be spawned or run.
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Catch-all for any other mid-pipeline failure.
    #[error("Generation aborted: {reason}")]
    GenerationAborted { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound {
                requested,
                available,
            } => {
                let mut s = vec![format!("No template named '{requested}' is installed")];
                if available.is_empty() {
                    s.push("The installed package contains no templates".into());
                } else {
                    s.push(format!("Available: {}", available.join(", ")));
                }
                s.push("Run: specforge templates to list what is available".into());
                s
            }
            Self::PackageInstallFailed { .. } => vec![
                "Check your network connection and registry URL".into(),
                "Ensure npm is installed and you can write to its global prefix".into(),
            ],
            Self::CommandTimedOut { command, .. } => vec![
                format!("'{command}' did not finish in time"),
                "Check your network connection and try again".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Ensure '{command}' is installed and on your PATH"),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::GenerationAborted { .. } => {
                vec!["Re-run with -v for details, then retry with corrected inputs".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::PackageInstallFailed { .. }
            | Self::CommandTimedOut { .. }
            | Self::CommandFailed { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } | Self::GenerationAborted { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
