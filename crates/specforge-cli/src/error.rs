//! Comprehensive error handling for Specforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::path::PathBuf;
use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use specforge_core::error::SpecforgeError;

// Re-export so callers only need `use crate::error::*`.
pub use specforge_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Project directory already exists and is not empty.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `specforge-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] SpecforgeError),

    /// The generation pipeline finished with recorded errors.
    ///
    /// Distinct from [`Self::Core`]: the pipeline ran to its reporting
    /// stage and produced a structured result, so partial progress may be
    /// on disk. The category comes from the result's first failure so the
    /// exit code matches what the typed error would have produced.
    #[error("Generation failed: {}", .errors.join("; "))]
    GenerationFailed {
        errors: Vec<String>,
        category: CoreCategory,
    },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ProjectExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Use --force to scaffold into it anyway".into(),
                "Choose a different project name".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-project, my_app, project123".into(),
            ],

            Self::ConfigError { message } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::GenerationFailed { .. } => vec![
                "Files created before the failure were kept (nothing is rolled back)".into(),
                "Re-run with -v for the full pipeline log".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No changes were made".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectExists { .. } => ErrorCategory::UserError,
            Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => map_core_category(core.category()),
            Self::GenerationFailed { category, .. } => map_core_category(*category),
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(output, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = write!(output, "\n  {} {}\n", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = write!(output, "\n{}\n", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            output.push('\n');
            let _ = writeln!(
                output,
                "{} {}",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

fn map_core_category(category: CoreCategory) -> ErrorCategory {
    match category {
        CoreCategory::Validation => ErrorCategory::UserError,
        CoreCategory::NotFound => ErrorCategory::NotFound,
        CoreCategory::External | CoreCategory::Internal => ErrorCategory::Internal,
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}
