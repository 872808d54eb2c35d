//! Domain layer errors.
//!
//! These represent violations of business rules (invalid configuration,
//! malformed inputs), not orchestration or I/O failures — those are
//! `ApplicationError` from `crate::application`.

use thiserror::Error;

/// Errors raised by the domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A generation configuration field failed validation.
    ///
    /// Raised before any filesystem write happens; a config that does not
    /// validate never reaches the pipeline.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    /// A template asset referenced by name does not exist in the bundled pack.
    #[error("Bundled asset not found: {name}")]
    MissingBundledAsset { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration { field, reason } => vec![
                format!("The '{field}' setting is invalid: {reason}"),
                "Check the command-line arguments and try again".into(),
            ],
            Self::MissingBundledAsset { name } => vec![
                format!("The bundled template pack has no '{name}' asset"),
                "This build of specforge may be incomplete; reinstall it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::MissingBundledAsset { .. } => ErrorCategory::Internal,
        }
    }
}

/// Domain error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
