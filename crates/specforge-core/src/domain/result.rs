//! Structured outcome of a generation run.

use std::path::{Path, PathBuf};

use crate::error::ErrorCategory;

/// Result of one generation run.
///
/// ## Invariants
///
/// - `success == false` iff at least one unrecoverable error was recorded.
/// - `files_created` is append-only: entries are never deduplicated,
///   removed or reordered. The orchestrator owns the list; every other
///   component receives it by mutable reference and only appends.
/// - Missing *optional* assets (memory files, `.mcp.json`, template-local
///   scripts) never appear in `errors` — they are silently skipped or, at
///   most, downgraded to `warnings`.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub success: bool,
    /// Absolute paths of every file written, in creation order.
    pub files_created: Vec<PathBuf>,
    pub total_files: usize,
    /// Sum of on-disk sizes of `files_created`, in bytes.
    pub total_size: u64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Category of the *first* unrecoverable error, for callers that map
    /// failures onto exit codes. `None` while `success` is true.
    pub failure_category: Option<ErrorCategory>,
}

impl GenerationResult {
    /// Start a run that is successful until proven otherwise.
    pub fn new() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Record an unrecoverable error and mark the run as failed.
    ///
    /// Files already recorded stay in `files_created` — partial progress is
    /// reported, not rolled back.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.success = false;
    }

    /// Like [`Self::fail`], keeping the category of the first failure.
    pub fn fail_with(&mut self, category: ErrorCategory, error: impl Into<String>) {
        self.failure_category.get_or_insert(category);
        self.fail(error);
    }

    /// Record a recoverable condition that never flips `success`.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Append a created file path.
    pub fn record_file(&mut self, path: impl Into<PathBuf>) {
        self.files_created.push(path.into());
    }

    /// Fix the file count from the created list.
    pub fn finalize_counts(&mut self) {
        self.total_files = self.files_created.len();
    }

    /// Whether a specific path was recorded as created.
    pub fn created(&self, path: &Path) -> bool {
        self.files_created.iter().any(|p| p == path)
    }
}
