//! Cursor adapter: plain Markdown commands, no sidecar.

use crate::domain::{AiAssistant, CommandFile, GenerationConfig};

use super::{AssistantAdapter, SidecarFile};

pub struct CursorAdapter;

impl AssistantAdapter for CursorAdapter {
    fn assistant(&self) -> AiAssistant {
        AiAssistant::Cursor
    }

    fn directory_name(&self) -> &'static str {
        ".cursor/commands"
    }

    fn command_extension(&self) -> &'static str {
        "md"
    }

    fn render_command(&self, command: &CommandFile, _config: &GenerationConfig) -> String {
        command.emit_markdown()
    }

    fn config_sidecar(&self, _config: &GenerationConfig) -> Option<SidecarFile> {
        None
    }
}
