//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use bake_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BakeError, BakeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> BakeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BakeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> BakeResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable {
                mode | 0o111
            } else {
                mode & !0o111
            });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, executable);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Mode bits ignore ownership, so this creates (and drops) a scratch
    /// file inside `path`.
    fn is_writable_dir(&self, path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        tempfile::Builder::new()
            .prefix(".bake-write-check")
            .tempfile_in(path)
            .is_ok()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BakeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
