//! Directory materializer: copies template trees onto the project path.
//!
//! Pure orchestration over the [`Filesystem`] port. Every regular file
//! written or copied is appended to the shared created-files list the
//! orchestrator owns; directories themselves are never recorded.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{application::ports::Filesystem, error::SpecforgeResult};

/// Directory names at the top level of an external template that must NOT
/// be copied verbatim. Their contents require placeholder substitution or
/// per-assistant branching, so dedicated downstream steps own them.
pub const RESERVED_TEMPLATE_DIRS: [&str; 5] =
    ["commands", "scripts", "memory", "templates", "rules"];

/// Separator inserted between an existing README and template content.
const README_SEPARATOR: &str = "\n\n---\n\n";

/// Copies template trees, honoring exclusions and tracking created files.
pub struct DirectoryMaterializer<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> DirectoryMaterializer<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Recursively copy `source` into `dest`, depth-first.
    ///
    /// An entry whose name matches `exclude` is skipped entirely at any
    /// depth — an excluded directory is not descended into. Names in
    /// `root_exclude` are skipped at the top level of `source` only; a
    /// nested file with the same name is copied verbatim. Every regular
    /// file copied is appended to `created`.
    #[instrument(skip_all, fields(source = %source.display(), dest = %dest.display()))]
    pub fn copy_tree(
        &self,
        source: &Path,
        dest: &Path,
        exclude: &[&str],
        root_exclude: &[&str],
        created: &mut Vec<PathBuf>,
    ) -> SpecforgeResult<()> {
        self.fs.create_dir_all(dest)?;

        for entry in self.fs.read_dir(source)? {
            let name = entry.file_name.as_str();
            if exclude.contains(&name) || root_exclude.contains(&name) {
                debug!(name = %entry.file_name, "skipping excluded entry");
                continue;
            }

            let target = dest.join(&entry.file_name);
            if entry.is_dir {
                self.copy_tree(&entry.path, &target, exclude, &[], created)?;
            } else {
                self.fs.copy_file(&entry.path, &target)?;
                created.push(target);
            }
        }

        Ok(())
    }

    /// Merge a template README with whatever already exists at the project.
    ///
    /// Content that existed at `project_root` *before* this call always
    /// comes first, followed by a visible `---` rule and the template's
    /// README — a caller's own project description is never silently
    /// discarded by scaffolding. With no pre-existing file the template
    /// README is written verbatim; with no template README this is a no-op.
    pub fn merge_readme(
        &self,
        template_root: &Path,
        project_root: &Path,
        created: &mut Vec<PathBuf>,
    ) -> SpecforgeResult<()> {
        let template_readme = template_root.join("README.md");
        if !self.fs.exists(&template_readme) {
            return Ok(());
        }
        let template_content = self.fs.read_to_string(&template_readme)?;

        let project_readme = project_root.join("README.md");
        let merged = if self.fs.exists(&project_readme) {
            let existing = self.fs.read_to_string(&project_readme)?;
            format!(
                "{}{README_SEPARATOR}{}",
                existing.trim_end(),
                template_content
            )
        } else {
            template_content
        };

        self.fs.write_file(&project_readme, &merged)?;
        created.push(project_readme);
        Ok(())
    }

    /// Copy a single named file only if the template provides it.
    ///
    /// Absence is never an error or a warning; returns whether a copy
    /// happened.
    pub fn copy_optional_file(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        name: &str,
        created: &mut Vec<PathBuf>,
    ) -> SpecforgeResult<bool> {
        let source = source_dir.join(name);
        if !self.fs.exists(&source) {
            return Ok(false);
        }

        let dest = dest_dir.join(name);
        self.fs.copy_file(&source, &dest)?;
        created.push(dest);
        Ok(true)
    }
}
