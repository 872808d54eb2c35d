//! Generation configuration: which assistant, which dialect, which template.
//!
//! A [`GenerationConfig`] is the single input to the generation pipeline.
//! The CLI layer builds it from already-parsed arguments; the core only
//! re-checks the invariants it depends on (non-empty name, absolute path).
//!
//! The three enums here are deliberately closed sets: adding a new assistant
//! variant forces every `match` over [`AiAssistant`] to be revisited, which
//! is exactly the exhaustiveness guarantee the format adapters rely on.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// The AI coding assistant a project is scaffolded for.
///
/// Each variant owns a distinct output directory, command-file extension and
/// body format (see `application::assistants`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiAssistant {
    Claude,
    Copilot,
    Gemini,
    Cursor,
    Codebuddy,
}

impl AiAssistant {
    /// Canonical lowercase name, substituted for the `__AGENT__` token.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Copilot => "copilot",
            Self::Gemini => "gemini",
            Self::Cursor => "cursor",
            Self::Codebuddy => "codebuddy",
        }
    }

    /// The argument placeholder dialect this assistant understands.
    ///
    /// Gemini command files use the `{{args}}` convention; every other
    /// assistant consumes `$ARGUMENTS`.
    pub fn args_token(self) -> &'static str {
        match self {
            Self::Gemini => "{{args}}",
            _ => "$ARGUMENTS",
        }
    }

    /// All supported variants, in display order.
    pub const ALL: [AiAssistant; 5] = [
        Self::Claude,
        Self::Copilot,
        Self::Gemini,
        Self::Cursor,
        Self::Codebuddy,
    ];
}

impl fmt::Display for AiAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Scripting convention for generated automation scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptDialect {
    Posix,
    PowerShell,
}

impl ScriptDialect {
    /// Short code used as the key of the per-dialect `scripts:` sub-map in
    /// command-file headers.
    pub fn short_code(self) -> &'static str {
        match self {
            Self::Posix => "sh",
            Self::PowerShell => "ps",
        }
    }

    /// Subdirectory under `scripts/` holding this dialect's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Posix => "bash",
            Self::PowerShell => "powershell",
        }
    }
}

impl fmt::Display for ScriptDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// Generation workflow variant.
///
/// `Roadmap` additionally scaffolds a top-level roadmap document and an
/// empty modules registry under `specs/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowMode {
    #[default]
    Legacy,
    Roadmap,
}

impl fmt::Display for WorkflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Roadmap => f.write_str("roadmap"),
        }
    }
}

/// Input to a single generation run.
///
/// ## Invariant
///
/// If `template_name` is `None` the pipeline uses the bundled default
/// template; if `Some`, the external-package path runs instead. Exactly one
/// of the two materialization paths executes per invocation.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub ai_assistant: AiAssistant,
    pub script_dialect: ScriptDialect,
    pub workflow_mode: WorkflowMode,
    /// Absolute path of the project root to materialize into.
    pub project_path: PathBuf,
    pub project_name: String,
    /// Name of an external template to fetch, or `None` for the bundled one.
    pub template_name: Option<String>,
}

impl GenerationConfig {
    /// Start the builder pattern for fluent construction.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Check the invariants the pipeline depends on.
    ///
    /// Called by the orchestrator before any filesystem write. Enum fields
    /// need no checking — membership is guaranteed by the type system.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.trim().is_empty() {
            return Err(DomainError::InvalidConfiguration {
                field: "project_name",
                reason: "cannot be empty".into(),
            });
        }
        if self.project_path.as_os_str().is_empty() {
            return Err(DomainError::InvalidConfiguration {
                field: "project_path",
                reason: "cannot be empty".into(),
            });
        }
        if !self.project_path.is_absolute() {
            return Err(DomainError::InvalidConfiguration {
                field: "project_path",
                reason: format!("must be absolute, got '{}'", self.project_path.display()),
            });
        }
        if let Some(name) = &self.template_name {
            if name.trim().is_empty() {
                return Err(DomainError::InvalidConfiguration {
                    field: "template_name",
                    reason: "cannot be empty when present".into(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug, Default)]
pub struct GenerationConfigBuilder {
    ai_assistant: Option<AiAssistant>,
    script_dialect: Option<ScriptDialect>,
    workflow_mode: WorkflowMode,
    project_path: Option<PathBuf>,
    project_name: Option<String>,
    template_name: Option<String>,
}

impl GenerationConfigBuilder {
    pub fn ai_assistant(mut self, assistant: AiAssistant) -> Self {
        self.ai_assistant = Some(assistant);
        self
    }

    pub fn script_dialect(mut self, dialect: ScriptDialect) -> Self {
        self.script_dialect = Some(dialect);
        self
    }

    pub fn workflow_mode(mut self, mode: WorkflowMode) -> Self {
        self.workflow_mode = mode;
        self
    }

    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Consume the builder, validating the assembled config.
    pub fn build(self) -> Result<GenerationConfig, DomainError> {
        let config = GenerationConfig {
            ai_assistant: self.ai_assistant.ok_or(DomainError::InvalidConfiguration {
                field: "ai_assistant",
                reason: "is required".into(),
            })?,
            script_dialect: self
                .script_dialect
                .ok_or(DomainError::InvalidConfiguration {
                    field: "script_dialect",
                    reason: "is required".into(),
                })?,
            workflow_mode: self.workflow_mode,
            project_path: self.project_path.unwrap_or_default(),
            project_name: self.project_name.unwrap_or_default(),
            template_name: self.template_name,
        };
        config.validate()?;
        Ok(config)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
