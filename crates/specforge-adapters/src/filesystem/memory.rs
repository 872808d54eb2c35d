//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use specforge_core::{
    application::{
        ApplicationError,
        ports::{DirEntryInfo, Filesystem},
    },
    error::SpecforgeResult,
};

/// In-memory filesystem for testing.
///
/// BTree-backed so enumeration order is deterministic without sorting.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating parent directories (testing helper).
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            add_dir_chain(&mut inner.directories, parent);
        }
        inner.files.insert(path, content.into());
    }

    /// Seed a directory chain (testing helper).
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        add_dir_chain(&mut inner.directories, &path.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Remove a single file (testing helper, e.g. vanished-file scenarios).
    pub fn remove_file(&self, path: &Path) {
        let mut inner = self.inner.write().unwrap();
        inner.files.remove(path);
        inner.executables.remove(path);
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.executables.contains(path)
    }

    /// List all files, in path order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn add_dir_chain(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn missing(path: &Path, what: &str) -> specforge_core::error::SpecforgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SpecforgeResult<()> {
        let mut inner = self.inner.write().unwrap();
        add_dir_chain(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SpecforgeResult<()> {
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> SpecforgeResult<String> {
        let inner = self.inner.read().unwrap();
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| missing(path, "file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SpecforgeResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)
    }

    fn read_dir(&self, path: &Path) -> SpecforgeResult<Vec<DirEntryInfo>> {
        let inner = self.inner.read().unwrap();
        if !inner.directories.contains(path) {
            return Err(missing(path, "directory"));
        }

        let direct_child = |p: &Path| p.parent() == Some(path);
        let mut entries: Vec<DirEntryInfo> = inner
            .directories
            .iter()
            .filter(|p| direct_child(p))
            .map(|p| DirEntryInfo {
                path: p.clone(),
                file_name: file_name_of(p),
                is_dir: true,
            })
            .chain(
                inner
                    .files
                    .keys()
                    .filter(|p| direct_child(p))
                    .map(|p| DirEntryInfo {
                        path: p.clone(),
                        file_name: file_name_of(p),
                        is_dir: false,
                    }),
            )
            .collect();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.directories.contains(path)
    }

    fn file_size(&self, path: &Path) -> SpecforgeResult<u64> {
        let inner = self.inner.read().unwrap();
        inner
            .files
            .get(path)
            .map(|c| c.len() as u64)
            .ok_or_else(|| missing(path, "file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SpecforgeResult<()> {
        let mut inner = self.inner.write().unwrap();
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
