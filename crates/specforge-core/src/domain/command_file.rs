//! Command-file model: frontmatter parsing and placeholder substitution.
//!
//! A source command file is a Markdown document with an optional leading
//! header block delimited by lines consisting solely of three hyphens:
//!
//! ```text
//! ---
//! description: Plan the implementation for a feature.
//! scripts:
//!   sh: scripts/bash/setup-plan.sh --json
//!   ps: scripts/powershell/setup-plan.ps1 -Json
//! ---
//!
//! Run `{SCRIPT}` with the arguments {ARGS} ...
//! ```
//!
//! [`CommandFile::parse`] produces a typed header (a structured parser, not
//! repeated ad hoc line scanning) plus the raw body.
//! [`CommandFile::apply_placeholders`] then runs the substitution pipeline
//! in a fixed order — later steps assume earlier ones already removed
//! ambiguity:
//!
//! 1. Resolve the active script path for the configured dialect from the
//!    nested `scripts:` map and substitute every `{SCRIPT}` occurrence.
//!    If the dialect key is absent the placeholder is left untouched.
//! 2. Substitute `{ARGS}` with the *assistant's* argument dialect
//!    (`{{args}}` for Gemini, `$ARGUMENTS` otherwise).
//! 3. Substitute `__AGENT__` with the assistant's canonical name.
//! 4. Rewrite bare `memory/`, `scripts/`, `templates/` path prefixes to
//!    their project-local `.specify/...` equivalents (idempotent).
//!
//! The `scripts:` key never survives to emission: [`CommandFile::emit_markdown`]
//! writes the remaining header fields only, because script resolution is
//! already baked into the body by step 1 and the per-dialect map must not
//! leak into generated output.
//!
//! ## Malformed headers
//!
//! A file with zero or one `---` delimiter has no header; the whole text is
//! treated as body and still goes through the body-only substitutions.
//! This degrades gracefully rather than failing the run.

use std::collections::BTreeMap;

use super::config::{AiAssistant, ScriptDialect};

/// Line that opens and closes a header block.
const HEADER_DELIMITER: &str = "---";

/// Header key carrying the per-dialect script sub-map. Internal-only:
/// stripped before emission.
const SCRIPTS_KEY: &str = "scripts";

/// Parsed header block of a command file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Plain key/value fields in source order, `scripts` excluded.
    fields: Vec<(String, String)>,
    /// Nested per-dialect script map, keyed by short code (`sh` / `ps`).
    scripts: BTreeMap<String, String>,
}

impl HeaderBlock {
    /// Look up a plain field by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The script reference registered for a dialect, if any.
    pub fn script_for(&self, dialect: ScriptDialect) -> Option<&str> {
        self.scripts.get(dialect.short_code()).map(String::as_str)
    }

    /// True when the file carried no parseable header at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.scripts.is_empty()
    }

    /// Ordered plain fields, for emission.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn parse(lines: &[&str]) -> Self {
        let mut header = Self::default();
        let mut in_scripts = false;

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            // Indented lines belong to the scripts sub-map while it is open.
            let indented = line.starts_with(' ') || line.starts_with('\t');
            if in_scripts && indented {
                if let Some((key, value)) = line.split_once(':') {
                    header
                        .scripts
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                continue;
            }
            in_scripts = false;

            let Some((key, value)) = line.split_once(':') else {
                // Not key/value shaped; tolerated and dropped.
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if key == SCRIPTS_KEY && value.is_empty() {
                in_scripts = true;
            } else {
                header.fields.push((key.to_string(), value.to_string()));
            }
        }

        header
    }
}

/// In-memory representation of a single scaffold command.
///
/// Created by reading a source `.md` file, mutated by
/// [`apply_placeholders`](Self::apply_placeholders), consumed by exactly
/// one assistant format adapter, then discarded — only the rendered output
/// is written to disk.
#[derive(Debug, Clone)]
pub struct CommandFile {
    /// Command name, i.e. the source file stem (`plan`, `tasks`, ...).
    pub name: String,
    pub header: HeaderBlock,
    pub body: String,
}

impl CommandFile {
    /// Parse raw command-file text.
    ///
    /// Never fails: a malformed header (missing closing delimiter) leaves
    /// the header empty and the full text as body.
    pub fn parse(name: impl Into<String>, raw: &str) -> Self {
        let name = name.into();
        let lines: Vec<&str> = raw.lines().collect();

        let has_open = lines
            .first()
            .is_some_and(|l| l.trim_end() == HEADER_DELIMITER);
        let close = if has_open {
            lines[1..]
                .iter()
                .position(|l| l.trim_end() == HEADER_DELIMITER)
                .map(|i| i + 1)
        } else {
            None
        };

        match close {
            Some(close) => {
                let header = HeaderBlock::parse(&lines[1..close]);
                let mut body = lines[close + 1..].join("\n");
                if raw.ends_with('\n') && !body.ends_with('\n') {
                    body.push('\n');
                }
                Self { name, header, body }
            }
            None => Self {
                name,
                header: HeaderBlock::default(),
                body: raw.to_string(),
            },
        }
    }

    /// Run the substitution pipeline for the given dialect and assistant.
    ///
    /// Idempotent: a second application is a no-op because the literal
    /// tokens no longer exist after the first pass.
    pub fn apply_placeholders(&mut self, dialect: ScriptDialect, assistant: AiAssistant) {
        if let Some(script) = self.header.script_for(dialect) {
            self.body = self.body.replace("{SCRIPT}", script);
        }
        self.body = self.body.replace("{ARGS}", assistant.args_token());
        self.body = self.body.replace("__AGENT__", assistant.canonical_name());
        self.body = rewrite_project_paths(&self.body);
    }

    /// Emit the command as Markdown with frontmatter.
    ///
    /// The `scripts:` sub-map is dropped; remaining header fields are
    /// re-emitted in source order. A file that had no header emits its
    /// body unchanged.
    pub fn emit_markdown(&self) -> String {
        if self.header.fields().is_empty() {
            return self.body.clone();
        }

        let mut out = String::with_capacity(self.body.len() + 64);
        out.push_str(HEADER_DELIMITER);
        out.push('\n');
        for (key, value) in self.header.fields() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str(HEADER_DELIMITER);
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

/// Rewrite bare top-level `memory/`, `scripts/`, `templates/` references to
/// their `.specify/...` project-local equivalents.
///
/// A prefix is only rewritten when it sits at a path boundary — start of
/// text, whitespace, backtick, quote, or an opening parenthesis. An
/// occurrence already preceded by `.specify/` has `/` before it, which is
/// not a boundary, so re-running the rewrite is a no-op.
pub fn rewrite_project_paths(text: &str) -> String {
    const PREFIXES: [&str; 3] = ["memory/", "scripts/", "templates/"];

    let mut out = String::with_capacity(text.len() + 32);
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let matched = PREFIXES.iter().find(|p| rest.starts_with(**p)).copied();

        if let Some(prefix) = matched {
            let at_boundary =
                prev.is_none_or(|c| c.is_whitespace() || matches!(c, '`' | '\'' | '"' | '('));
            if at_boundary {
                out.push_str(".specify/");
                out.push_str(prefix);
                prev = Some('/');
                i += prefix.len();
                continue;
            }
        }

        if let Some(ch) = rest.chars().next() {
            out.push(ch);
            prev = Some(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }

    out
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_COMMAND: &str = "---\n\
description: Plan the implementation for a feature.\n\
scripts:\n\
\x20 sh: scripts/bash/setup-plan.sh --json\n\
\x20 ps: scripts/powershell/setup-plan.ps1 -Json\n\
---\n\
\n\
Run `{SCRIPT}` for __AGENT__ with {ARGS}, then read memory/constitution.md.\n";

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parses_fields_and_nested_scripts() {
        let cmd = CommandFile::parse("plan", PLAN_COMMAND);
        assert_eq!(
            cmd.header.get("description"),
            Some("Plan the implementation for a feature.")
        );
        assert_eq!(
            cmd.header.script_for(ScriptDialect::Posix),
            Some("scripts/bash/setup-plan.sh --json")
        );
        assert_eq!(
            cmd.header.script_for(ScriptDialect::PowerShell),
            Some("scripts/powershell/setup-plan.ps1 -Json")
        );
        assert!(cmd.body.contains("{SCRIPT}"));
    }

    #[test]
    fn missing_closing_delimiter_degrades_to_plain_body() {
        let raw = "---\ndescription: broken\nNo closing line here.\n";
        let cmd = CommandFile::parse("broken", raw);
        assert!(cmd.header.is_empty());
        assert_eq!(cmd.body, raw);
    }

    #[test]
    fn no_header_at_all_is_plain_body() {
        let raw = "Just a body.\n";
        let cmd = CommandFile::parse("plain", raw);
        assert!(cmd.header.is_empty());
        assert_eq!(cmd.body, raw);
    }

    // ── substitution pipeline ─────────────────────────────────────────────

    #[test]
    fn substitutes_script_for_posix_dialect() {
        let mut cmd = CommandFile::parse("plan", PLAN_COMMAND);
        cmd.apply_placeholders(ScriptDialect::Posix, AiAssistant::Claude);
        assert!(
            cmd.body
                .contains("`.specify/scripts/bash/setup-plan.sh --json`")
        );
        assert!(!cmd.body.contains("{SCRIPT}"));
    }

    #[test]
    fn substitutes_script_for_powershell_dialect() {
        let mut cmd = CommandFile::parse("plan", PLAN_COMMAND);
        cmd.apply_placeholders(ScriptDialect::PowerShell, AiAssistant::Claude);
        assert!(cmd.body.contains("setup-plan.ps1 -Json"));
    }

    #[test]
    fn absent_dialect_key_leaves_script_placeholder() {
        let raw = "---\nscripts:\n  sh: scripts/bash/x.sh\n---\n{SCRIPT}\n";
        let mut cmd = CommandFile::parse("x", raw);
        cmd.apply_placeholders(ScriptDialect::PowerShell, AiAssistant::Claude);
        assert!(cmd.body.contains("{SCRIPT}"));
    }

    #[test]
    fn args_token_depends_on_assistant_not_dialect() {
        let mut gemini = CommandFile::parse("plan", PLAN_COMMAND);
        gemini.apply_placeholders(ScriptDialect::Posix, AiAssistant::Gemini);
        assert!(gemini.body.contains("{{args}}"));

        let mut cursor = CommandFile::parse("plan", PLAN_COMMAND);
        cursor.apply_placeholders(ScriptDialect::Posix, AiAssistant::Cursor);
        assert!(cursor.body.contains("$ARGUMENTS"));
    }

    #[test]
    fn agent_token_becomes_canonical_name() {
        let mut cmd = CommandFile::parse("plan", PLAN_COMMAND);
        cmd.apply_placeholders(ScriptDialect::Posix, AiAssistant::Codebuddy);
        assert!(cmd.body.contains("for codebuddy with"));
        assert!(!cmd.body.contains("__AGENT__"));
    }

    #[test]
    fn pipeline_is_idempotent() {
        let mut cmd = CommandFile::parse("plan", PLAN_COMMAND);
        cmd.apply_placeholders(ScriptDialect::Posix, AiAssistant::Claude);
        let once = cmd.body.clone();
        cmd.apply_placeholders(ScriptDialect::Posix, AiAssistant::Claude);
        assert_eq!(cmd.body, once);
    }

    // ── path rewriting ────────────────────────────────────────────────────

    #[test]
    fn bare_prefixes_are_rewritten() {
        assert_eq!(
            rewrite_project_paths("see memory/constitution.md"),
            "see .specify/memory/constitution.md"
        );
        assert_eq!(
            rewrite_project_paths("run scripts/bash/x.sh"),
            "run .specify/scripts/bash/x.sh"
        );
        assert_eq!(
            rewrite_project_paths("(templates/spec-template.md)"),
            "(.specify/templates/spec-template.md)"
        );
    }

    #[test]
    fn already_prefixed_paths_are_untouched() {
        let text = "read .specify/memory/constitution.md";
        assert_eq!(rewrite_project_paths(text), text);
    }

    #[test]
    fn mid_word_occurrences_are_untouched() {
        let text = "in-memory/cache and sub/templates/dir";
        assert_eq!(rewrite_project_paths(text), text);
    }

    #[test]
    fn rewrite_at_start_of_text() {
        assert_eq!(
            rewrite_project_paths("memory/x.md"),
            ".specify/memory/x.md"
        );
    }

    // ── emission ──────────────────────────────────────────────────────────

    #[test]
    fn emit_strips_scripts_key() {
        let mut cmd = CommandFile::parse("plan", PLAN_COMMAND);
        cmd.apply_placeholders(ScriptDialect::Posix, AiAssistant::Claude);
        let emitted = cmd.emit_markdown();
        assert!(emitted.starts_with("---\n"));
        assert!(emitted.contains("description: Plan the implementation"));
        assert!(!emitted.contains("scripts:"));
        assert!(!emitted.contains("sh:"));
    }

    #[test]
    fn emit_without_header_is_body_only() {
        let cmd = CommandFile::parse("plain", "Just a body.\n");
        assert_eq!(cmd.emit_markdown(), "Just a body.\n");
    }
}
