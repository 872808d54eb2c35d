//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `specforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SpecforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `specforge_adapters::filesystem::LocalFilesystem` (production)
/// - `specforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// The capability set mirrors exactly what the pipeline consumes: stat,
/// mkdir-recursive, read-dir, read-file, write-file, copy-file, chmod.
/// There is deliberately no recursive delete — generation is best-effort
/// transparent, never transactional, so nothing is ever rolled back.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SpecforgeResult<()>;

    /// Write content to a file, creating it if necessary.
    fn write_file(&self, path: &Path, content: &str) -> SpecforgeResult<()>;

    /// Read an entire file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> SpecforgeResult<String>;

    /// Copy a single regular file.
    fn copy_file(&self, from: &Path, to: &Path) -> SpecforgeResult<()>;

    /// List the entries of a directory (non-recursive).
    fn read_dir(&self, path: &Path) -> SpecforgeResult<Vec<DirEntryInfo>>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Size of a regular file in bytes.
    fn file_size(&self, path: &Path) -> SpecforgeResult<u64>;

    /// Set or clear the executable bit (no-op where unsupported).
    fn set_permissions(&self, path: &Path, executable: bool) -> SpecforgeResult<()>;
}

/// A single directory entry as reported by [`Filesystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Final path component as UTF-8.
    pub file_name: String,
    pub is_dir: bool,
}

/// Port for running external commands.
///
/// Implemented by:
/// - `specforge_adapters::process::SystemCommandRunner` (production)
/// - `specforge_adapters::process::ScriptedCommandRunner` (testing; returns
///   canned success/timeout/permission-error outcomes without touching the
///   real package manager)
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, capturing output, bounded by `timeout`.
    ///
    /// A non-zero exit is *not* an `Err` — it is reported through
    /// [`CommandOutput::success`] so callers can pass the raw tool output
    /// through unmodified. `Err` is reserved for spawn failures and
    /// timeouts.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> SpecforgeResult<CommandOutput>;
}

/// Captured output of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Combined output for raw pass-through error reporting: stderr first
    /// (installers put diagnostics there), stdout appended when non-empty.
    pub fn raw_text(&self) -> String {
        match (self.stderr.trim(), self.stdout.trim()) {
            ("", out) => out.to_string(),
            (err, "") => err.to_string(),
            (err, out) => format!("{err}\n{out}"),
        }
    }
}

/// Port for the bundled template pack shipped with the binary.
///
/// Implemented by `specforge_adapters::bundled::BundledTemplates`, which
/// embeds the assets at compile time.
pub trait TemplateAssets: Send + Sync {
    /// All assets of a section, with paths relative to the section root.
    fn section(&self, section: TemplateSection) -> Vec<TemplateAsset>;

    /// A single named asset from a section, if present.
    fn asset(&self, section: TemplateSection, relative_path: &str) -> Option<TemplateAsset> {
        self.section(section)
            .into_iter()
            .find(|a| a.relative_path == relative_path)
    }
}

/// The four sections a template pack is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSection {
    Commands,
    Scripts,
    Memory,
    Templates,
}

impl TemplateSection {
    /// Directory name of the section inside a template tree.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::Scripts => "scripts",
            Self::Memory => "memory",
            Self::Templates => "templates",
        }
    }
}

/// One bundled file: compile-time path and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Path relative to the section root (e.g. `bash/setup-plan.sh`).
    pub relative_path: &'static str,
    pub content: &'static str,
    /// Whether the materialized file should carry the executable bit.
    pub executable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_text_prefers_stderr_first() {
        let out = CommandOutput {
            success: false,
            stdout: "partial log".into(),
            stderr: "npm ERR! boom".into(),
        };
        assert_eq!(out.raw_text(), "npm ERR! boom\npartial log");
    }

    #[test]
    fn raw_text_with_only_stdout() {
        let out = CommandOutput {
            success: true,
            stdout: "/usr/lib/node_modules\n".into(),
            stderr: String::new(),
        };
        assert_eq!(out.raw_text(), "/usr/lib/node_modules");
    }

    #[test]
    fn section_dir_names() {
        assert_eq!(TemplateSection::Commands.dir_name(), "commands");
        assert_eq!(TemplateSection::Scripts.dir_name(), "scripts");
        assert_eq!(TemplateSection::Memory.dir_name(), "memory");
        assert_eq!(TemplateSection::Templates.dir_name(), "templates");
    }
}
