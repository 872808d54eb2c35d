//! Claude Code adapter: Markdown commands plus a JSON sidecar.

use serde_json::json;

use crate::domain::{AiAssistant, CommandFile, GenerationConfig};

use super::{AssistantAdapter, SidecarFile};

pub struct ClaudeAdapter;

impl AssistantAdapter for ClaudeAdapter {
    fn assistant(&self) -> AiAssistant {
        AiAssistant::Claude
    }

    fn directory_name(&self) -> &'static str {
        ".claude/commands"
    }

    fn command_extension(&self) -> &'static str {
        "md"
    }

    fn render_command(&self, command: &CommandFile, _config: &GenerationConfig) -> String {
        command.emit_markdown()
    }

    fn config_sidecar(&self, config: &GenerationConfig) -> Option<SidecarFile> {
        let content = json!({
            "project": config.project_name,
            "workflow": config.workflow_mode.to_string(),
            "rules": [
                "Read .specify/memory/constitution.md before any workflow command.",
                "Keep generated artifacts under .specify/ and specs/.",
            ],
            "templates": {
                "spec": ".specify/templates/spec-template.md",
                "plan": ".specify/templates/plan-template.md",
                "tasks": ".specify/templates/tasks-template.md",
            },
        });
        // Pretty output is part of the format: the sidecar is meant to be
        // read and edited by hand.
        let text = serde_json::to_string_pretty(&content).unwrap_or_default();
        Some(SidecarFile {
            file_name: ".claude-config.json",
            content: format!("{text}\n"),
        })
    }
}
