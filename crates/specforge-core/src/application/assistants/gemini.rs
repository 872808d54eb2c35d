//! Gemini CLI adapter: TOML command files plus a JSON sidecar.

use serde_json::json;

use crate::domain::{AiAssistant, CommandFile, GenerationConfig};

use super::{AssistantAdapter, SidecarFile};

pub struct GeminiAdapter;

impl AssistantAdapter for GeminiAdapter {
    fn assistant(&self) -> AiAssistant {
        AiAssistant::Gemini
    }

    fn directory_name(&self) -> &'static str {
        ".gemini/commands"
    }

    fn command_extension(&self) -> &'static str {
        "toml"
    }

    fn render_command(&self, command: &CommandFile, _config: &GenerationConfig) -> String {
        let description = command.header.get("description").unwrap_or_default();

        // Constraint: the body is emitted between TOML triple quotes without
        // escaping, so a body containing `"""` produces an invalid file.
        // None of the shipped commands do; externally supplied ones are on
        // the template author.
        format!(
            "description = \"{}\"\n\nprompt = \"\"\"\n{}\"\"\"\n",
            description.replace('"', "\\\""),
            ensure_trailing_newline(&command.body),
        )
    }

    fn config_sidecar(&self, config: &GenerationConfig) -> Option<SidecarFile> {
        let content = json!({
            "project": config.project_name,
            "model": "gemini-2.5-pro",
            "temperature": 0.2,
            "contextFileName": ".specify/memory/constitution.md",
        });
        let text = serde_json::to_string_pretty(&content).unwrap_or_default();
        Some(SidecarFile {
            file_name: ".gemini-config.json",
            content: format!("{text}\n"),
        })
    }
}

fn ensure_trailing_newline(body: &str) -> String {
    if body.ends_with('\n') {
        body.to_string()
    } else {
        format!("{body}\n")
    }
}
