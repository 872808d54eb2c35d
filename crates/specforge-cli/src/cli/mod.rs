//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use specforge_core::domain::{AiAssistant, ScriptDialect, WorkflowMode};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "specforge",
    bin_name = "specforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Spec-driven project scaffolding for AI assistants",
    long_about = "Specforge scaffolds spec-driven development layouts \
                  (commands, scripts, memory, templates) for AI coding \
                  assistants like Claude, Copilot, Gemini, Cursor and CodeBuddy.",
    after_help = "EXAMPLES:\n\
        \x20 specforge init my-project --ai claude\n\
        \x20 specforge init my-api --ai gemini --script sh --workflow roadmap\n\
        \x20 specforge init my-site --ai cursor --template web\n\
        \x20 specforge templates\n\
        \x20 specforge completions bash > /usr/share/bash-completion/completions/specforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a project for an AI assistant.
    #[command(
        visible_alias = "i",
        about = "Scaffold a new project",
        after_help = "EXAMPLES:\n\
            \x20 specforge init my-project --ai claude\n\
            \x20 specforge init my-api --ai gemini --workflow roadmap\n\
            \x20 specforge init my-site --ai copilot --template web --registry https://registry.example.com"
    )]
    Init(InitArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 specforge templates"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 specforge completions bash > ~/.local/share/bash-completion/completions/specforge\n\
            \x20 specforge completions zsh  > ~/.zfunc/_specforge\n\
            \x20 specforge completions fish > ~/.config/fish/completions/specforge.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `specforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Target AI assistant.  Falls back to `defaults.assistant` from the
    /// config file; init fails when neither is set.
    #[arg(
        short = 'a',
        long = "ai",
        value_name = "ASSISTANT",
        value_enum,
        help = "AI assistant to scaffold for"
    )]
    pub assistant: Option<Assistant>,

    /// Script dialect for generated automation scripts.  Falls back to
    /// `defaults.script`, then to `sh`.
    #[arg(
        short = 's',
        long = "script",
        value_name = "DIALECT",
        value_enum,
        help = "Script dialect (sh or ps)"
    )]
    pub script: Option<Dialect>,

    /// Workflow variant.  Falls back to `defaults.workflow`, then to
    /// `legacy`.
    #[arg(
        short = 'w',
        long = "workflow",
        value_name = "MODE",
        value_enum,
        help = "Workflow mode"
    )]
    pub workflow: Option<Workflow>,

    /// Use a named external template instead of the bundled one.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "External template name"
    )]
    pub template: Option<String>,

    /// Alternative npm registry for template installation.
    #[arg(
        long = "registry",
        value_name = "URL",
        help = "npm registry URL for the template package"
    )]
    pub registry: Option<String>,

    /// Exact template package version instead of latest.
    #[arg(
        long = "template-version",
        value_name = "VERSION",
        help = "Template package version"
    )]
    pub template_version: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and scaffold immediately"
    )]
    pub yes: bool,

    /// Scaffold into an existing non-empty directory.
    #[arg(long = "force", help = "Allow an existing project directory")]
    pub force: bool,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `specforge templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Also query the external template package.
    #[arg(
        long = "external",
        help = "Include externally installed templates (queries npm)"
    )]
    pub external: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `specforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported AI assistants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Assistant {
    Claude,
    Copilot,
    Gemini,
    Cursor,
    Codebuddy,
}

impl From<Assistant> for AiAssistant {
    fn from(value: Assistant) -> Self {
        match value {
            Assistant::Claude => Self::Claude,
            Assistant::Copilot => Self::Copilot,
            Assistant::Gemini => Self::Gemini,
            Assistant::Cursor => Self::Cursor,
            Assistant::Codebuddy => Self::Codebuddy,
        }
    }
}

/// Supported script dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    /// POSIX shell scripts (bash).
    #[value(name = "sh", alias = "bash")]
    Sh,
    /// PowerShell scripts.
    #[value(name = "ps", alias = "powershell")]
    Ps,
}

impl From<Dialect> for ScriptDialect {
    fn from(value: Dialect) -> Self {
        match value {
            Dialect::Sh => Self::Posix,
            Dialect::Ps => Self::PowerShell,
        }
    }
}

/// Supported workflow modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Workflow {
    Legacy,
    Roadmap,
}

impl From<Workflow> for WorkflowMode {
    fn from(value: Workflow) -> Self {
        match value {
            Workflow::Legacy => Self::Legacy,
            Workflow::Roadmap => Self::Roadmap,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
