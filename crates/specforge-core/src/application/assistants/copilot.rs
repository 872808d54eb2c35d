//! GitHub Copilot adapter: prompt files under `.github/prompts`.
//!
//! Copilot consumes "prompt files" rather than plain commands: the file is
//! named `<name>.prompt.md`, carries a prompt-metadata header built from the
//! command's description, and refers to user input as `${input:args}`.

use crate::domain::{AiAssistant, CommandFile, GenerationConfig};

use super::{AssistantAdapter, SidecarFile};

pub struct CopilotAdapter;

impl AssistantAdapter for CopilotAdapter {
    fn assistant(&self) -> AiAssistant {
        AiAssistant::Copilot
    }

    fn directory_name(&self) -> &'static str {
        ".github/prompts"
    }

    fn command_extension(&self) -> &'static str {
        "prompt.md"
    }

    fn render_command(&self, command: &CommandFile, _config: &GenerationConfig) -> String {
        let description = command.header.get("description").unwrap_or(&command.name);

        let mut out = String::with_capacity(command.body.len() + 96);
        out.push_str("---\n");
        out.push_str("mode: agent\n");
        out.push_str("description: ");
        out.push_str(description);
        out.push('\n');
        out.push_str("---\n\n");
        // The placeholder pipeline already produced `$ARGUMENTS`; Copilot's
        // prompt-file syntax names the same input differently.
        out.push_str(&command.body.replace("$ARGUMENTS", "${input:args}"));
        out
    }

    fn config_sidecar(&self, _config: &GenerationConfig) -> Option<SidecarFile> {
        None
    }
}
