//! Rendering of scaffold progress and results.
//!
//! One [`OutputManager`] per invocation owns the resolved output format,
//! the quiet/no-color switches and the terminal handle. Command handlers
//! hand it domain values (`GenerationConfig`, `GenerationResult`) and it
//! decides how they appear: indicator lines for humans, a JSON document
//! when `--output-format json` asked for one.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use specforge_core::domain::{GenerationConfig, GenerationResult};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            format: args.effective_format(),
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    // ── Line-level output ──────────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.indicator("\u{2713}", msg, |s| s.green().bold().to_string(), |s| {
            s.green().to_string()
        })
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode — errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.indicator("\u{26a0}", msg, |s| s.yellow().bold().to_string(), |s| {
            s.yellow().to_string()
        })
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.indicator("\u{2139}", msg, |s| s.blue().bold().to_string(), |s| {
            s.blue().to_string()
        })
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn indicator(
        &self,
        symbol: &str,
        msg: &str,
        style_symbol: impl Fn(&str) -> String,
        style_msg: impl Fn(&str) -> String,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", style_symbol(symbol), style_msg(msg))
        };
        self.term.write_line(&line)
    }

    // ── Domain rendering ───────────────────────────────────────────────────

    /// Show the resolved configuration block ahead of the confirm prompt.
    pub fn show_configuration(&self, config: &GenerationConfig) -> io::Result<()> {
        self.header("Configuration")?;
        self.print(&format!("  Assistant: {}", config.ai_assistant))?;
        self.print(&format!("  Scripts:   {}", config.script_dialect))?;
        self.print(&format!("  Workflow:  {}", config.workflow_mode))?;
        self.print(&format!(
            "  Template:  {}",
            config.template_name.as_deref().unwrap_or("bundled")
        ))?;
        self.print(&format!("  Path:      {}", config.project_path.display()))
    }

    /// Render the outcome of a successful run.
    ///
    /// Human/plain formats get the success line and, outside quiet mode,
    /// next-steps guidance. The JSON format emits one document on stdout
    /// regardless of quiet — machine consumers always get their payload.
    pub fn generation_summary(
        &self,
        result: &GenerationResult,
        config: &GenerationConfig,
        project_name: &str,
    ) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let summary = serde_json::json!({
                "project": project_name,
                "assistant": config.ai_assistant.canonical_name(),
                "path": config.project_path,
                "files": result.total_files,
                "bytes": result.total_size,
                "warnings": result.warnings,
            });
            return self.term.write_line(&format!("{summary:#}"));
        }

        self.success(&format!(
            "Project '{project_name}' scaffolded for {} ({} files, {} bytes)",
            config.ai_assistant, result.total_files, result.total_size
        ))?;

        if !self.quiet {
            self.print("")?;
            self.print("Next steps:")?;
            self.print(&format!("  cd {project_name}"))?;
            self.print("  # Edit .specify/memory/constitution.md, then run /specify")?;
        }
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
