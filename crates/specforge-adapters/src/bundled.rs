//! Bundled template pack, embedded at compile time.
//!
//! The default template ships inside the binary so `specforge init` works
//! offline with no package manager involved. Assets live under `assets/`
//! in this crate and are pulled in with `include_str!`.

use specforge_core::application::ports::{TemplateAsset, TemplateAssets, TemplateSection};

macro_rules! asset {
    ($section:literal, $path:literal) => {
        TemplateAsset {
            relative_path: $path,
            content: include_str!(concat!("../assets/", $section, "/", $path)),
            executable: false,
        }
    };
    ($section:literal, $path:literal, executable) => {
        TemplateAsset {
            relative_path: $path,
            content: include_str!(concat!("../assets/", $section, "/", $path)),
            executable: true,
        }
    };
}

const COMMANDS: &[TemplateAsset] = &[
    asset!("commands", "analyze.md"),
    asset!("commands", "clarify.md"),
    asset!("commands", "implement.md"),
    asset!("commands", "plan.md"),
    asset!("commands", "specify.md"),
    asset!("commands", "tasks.md"),
];

const SCRIPTS: &[TemplateAsset] = &[
    asset!("scripts", "bash/check-prerequisites.sh", executable),
    asset!("scripts", "bash/create-new-feature.sh", executable),
    asset!("scripts", "bash/setup-plan.sh", executable),
    asset!("scripts", "powershell/check-prerequisites.ps1", executable),
    asset!("scripts", "powershell/create-new-feature.ps1", executable),
    asset!("scripts", "powershell/setup-plan.ps1", executable),
];

const MEMORY: &[TemplateAsset] = &[asset!("memory", "constitution.md")];

const TEMPLATES: &[TemplateAsset] = &[
    asset!("templates", "modules-readme-template.md"),
    asset!("templates", "plan-template.md"),
    asset!("templates", "roadmap-template.md"),
    asset!("templates", "spec-template.md"),
    asset!("templates", "tasks-template.md"),
];

/// The compile-time template pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTemplates;

impl BundledTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateAssets for BundledTemplates {
    fn section(&self, section: TemplateSection) -> Vec<TemplateAsset> {
        let table = match section {
            TemplateSection::Commands => COMMANDS,
            TemplateSection::Scripts => SCRIPTS,
            TemplateSection::Memory => MEMORY,
            TemplateSection::Templates => TEMPLATES,
        };
        table.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specforge_core::domain::{CommandFile, ScriptDialect};

    #[test]
    fn ships_six_commands() {
        let names: Vec<&str> = BundledTemplates
            .section(TemplateSection::Commands)
            .iter()
            .map(|a| a.relative_path)
            .collect();
        assert_eq!(
            names,
            vec![
                "analyze.md",
                "clarify.md",
                "implement.md",
                "plan.md",
                "specify.md",
                "tasks.md"
            ]
        );
    }

    #[test]
    fn every_command_header_parses_with_both_dialects() {
        for asset in BundledTemplates.section(TemplateSection::Commands) {
            let cmd = CommandFile::parse(asset.relative_path, asset.content);
            assert!(!cmd.header.is_empty(), "{} has no header", asset.relative_path);
            assert!(cmd.header.get("description").is_some());
            assert!(cmd.header.script_for(ScriptDialect::Posix).is_some());
            assert!(cmd.header.script_for(ScriptDialect::PowerShell).is_some());
        }
    }

    #[test]
    fn scripts_are_executable_and_split_by_dialect() {
        let scripts = BundledTemplates.section(TemplateSection::Scripts);
        assert!(scripts.iter().all(|a| a.executable));
        assert!(scripts.iter().any(|a| a.relative_path.starts_with("bash/")));
        assert!(
            scripts
                .iter()
                .any(|a| a.relative_path.starts_with("powershell/"))
        );
    }

    #[test]
    fn roadmap_template_carries_both_name_tokens() {
        let roadmap = BundledTemplates
            .asset(TemplateSection::Templates, "roadmap-template.md")
            .unwrap();
        assert!(roadmap.content.contains("[Project Name]"));
        assert!(roadmap.content.contains("[项目名称]"));
    }

    #[test]
    fn memory_ships_the_constitution() {
        let memory = BundledTemplates.section(TemplateSection::Memory);
        assert_eq!(memory.len(), 1);
        assert_eq!(memory[0].relative_path, "constitution.md");
        assert!(memory[0].content.contains("Core Principles"));
    }
}
