//! Assistant format adapters.
//!
//! Each supported AI assistant owns a destination directory, a command
//! file extension/body format and an optional sidecar configuration file.
//! The capability set is one trait over a closed set of variants, selected
//! by [`adapter_for`] keyed on the [`AiAssistant`] enum — adding a variant
//! breaks the factory `match` at compile time, which is the point.
//!
//! | Variant   | Commands dir        | File naming        | Sidecar config        |
//! |-----------|---------------------|--------------------|-----------------------|
//! | Claude    | `.claude/commands`  | `<name>.md`        | `.claude-config.json` |
//! | Copilot   | `.github/prompts`   | `<name>.prompt.md` | none                  |
//! | Gemini    | `.gemini/commands`  | `<name>.toml`      | `.gemini-config.json` |
//! | Cursor    | `.cursor/commands`  | `<name>.md`        | none                  |
//! | Codebuddy | `.codebuddy/commands` | `<name>.md`      | none                  |

mod claude;
mod codebuddy;
mod copilot;
mod cursor;
mod gemini;

pub use claude::ClaudeAdapter;
pub use codebuddy::CodebuddyAdapter;
pub use copilot::CopilotAdapter;
pub use cursor::CursorAdapter;
pub use gemini::GeminiAdapter;

use crate::domain::{AiAssistant, CommandFile, GenerationConfig};

/// Capability set of one assistant variant.
///
/// `render_command` receives a command file that already went through the
/// placeholder pipeline; it only applies the variant's own body format.
pub trait AssistantAdapter: Send + Sync {
    /// The variant this adapter serves.
    fn assistant(&self) -> AiAssistant;

    /// Destination directory for command files, relative to the project root.
    fn directory_name(&self) -> &'static str;

    /// Extension of generated command files (without the leading dot).
    fn command_extension(&self) -> &'static str;

    /// Convert a placeholder-substituted command into the output body.
    fn render_command(&self, command: &CommandFile, config: &GenerationConfig) -> String;

    /// Optional sidecar configuration file written at the project root.
    fn config_sidecar(&self, config: &GenerationConfig) -> Option<SidecarFile>;
}

/// A sidecar configuration file emitted next to the assistant directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarFile {
    /// File name at the project root (e.g. `.claude-config.json`).
    pub file_name: &'static str,
    pub content: String,
}

/// Select the adapter for an assistant variant.
pub fn adapter_for(assistant: AiAssistant) -> Box<dyn AssistantAdapter> {
    match assistant {
        AiAssistant::Claude => Box::new(ClaudeAdapter),
        AiAssistant::Copilot => Box::new(CopilotAdapter),
        AiAssistant::Gemini => Box::new(GeminiAdapter),
        AiAssistant::Cursor => Box::new(CursorAdapter),
        AiAssistant::Codebuddy => Box::new(CodebuddyAdapter),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_covers_every_variant() {
        for assistant in AiAssistant::ALL {
            let adapter = adapter_for(assistant);
            assert_eq!(adapter.assistant(), assistant);
            assert!(!adapter.directory_name().is_empty());
            assert!(!adapter.command_extension().is_empty());
        }
    }

    #[test]
    fn extensions_are_per_variant() {
        assert_eq!(adapter_for(AiAssistant::Claude).command_extension(), "md");
        assert_eq!(
            adapter_for(AiAssistant::Copilot).command_extension(),
            "prompt.md"
        );
        assert_eq!(adapter_for(AiAssistant::Gemini).command_extension(), "toml");
        assert_eq!(adapter_for(AiAssistant::Cursor).command_extension(), "md");
        assert_eq!(
            adapter_for(AiAssistant::Codebuddy).command_extension(),
            "md"
        );
    }

    #[test]
    fn directories_do_not_collide() {
        let dirs: Vec<_> = AiAssistant::ALL
            .iter()
            .map(|a| adapter_for(*a).directory_name())
            .collect();
        let mut unique = dirs.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), dirs.len());
    }
}
