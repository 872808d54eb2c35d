//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use specforge_core::{
    application::ports::{DirEntryInfo, Filesystem},
    error::SpecforgeResult,
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SpecforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SpecforgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> SpecforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SpecforgeResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn read_dir(&self, path: &Path) -> SpecforgeResult<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        let read = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        for entry in read {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "stat entry"))?;
            entries.push(DirEntryInfo {
                path: entry.path(),
                file_name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        // Stable order regardless of the platform's directory iteration.
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_size(&self, path: &Path) -> SpecforgeResult<u64> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| map_io_error(path, e, "get metadata"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SpecforgeResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if executable {
                let metadata =
                    std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
                let mut perms = metadata.permissions();
                let mode = perms.mode();
                perms.set_mode(mode | 0o111);
                std::fs::set_permissions(path, perms)
                    .map_err(|e| map_io_error(path, e, "set permissions"))?;
            }
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = executable; // Silence unused warning
        }
        Ok(())
    }
}

fn map_io_error(
    path: &Path,
    e: io::Error,
    operation: &str,
) -> specforge_core::error::SpecforgeError {
    use specforge_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_file_through_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("a/b/c.txt");

        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(&path, "hello").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello");
        assert_eq!(fs.file_size(&path).unwrap(), 5);
    }

    #[test]
    fn read_dir_is_sorted_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&dir.path().join("zeta")).unwrap();
        fs.write_file(&dir.path().join("alpha.txt"), "x").unwrap();

        let entries = fs.read_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "alpha.txt");
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].file_name, "zeta");
        assert!(entries[1].is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_is_applied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("run.sh");
        fs.write_file(&path, "#!/bin/sh\n").unwrap();
        fs.set_permissions(&path, true).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }
}
