//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use curio_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CurioError, CurioResult},
};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
///
/// Writes go through a temporary file in the target directory that is then
/// renamed over the destination. On Unix the replacement keeps the
/// permissions of the file it replaces; new files get `0644`.
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
    fn create_dir_all(&self, path: &Path) -> CurioResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read(&self, path: &Path) -> CurioResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CurioResult<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| map_io_error(path, e, "create temp file"))?;
        temp.write_all(content)
            .map_err(|e| map_io_error(path, e, "write file"))?;
        #[cfg(unix)]
        temp.as_file()
            .set_permissions(unix::target_permissions(path))
            .map_err(|e| map_io_error(path, e, "set permissions"))?;
        temp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CurioResult<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io_error(path, e, "remove file")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &Path) -> CurioResult<Vec<String>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::filesystem(dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(unix)]
mod unix {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    const NEW_FILE_MODE: u32 = 0o644;

    /// Permissions of the file at `path`, or the default for a new file.
    pub(super) fn target_permissions(path: &Path) -> Permissions {
        std::fs::metadata(path)
            .map(|meta| meta.permissions())
            .unwrap_or_else(|_| Permissions::from_mode(NEW_FILE_MODE))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CurioError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
