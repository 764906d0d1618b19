//! Removal of generated and CMake-produced files.
//!
//! Walks the output tree and deletes, in this order:
//!
//! 1. every file named `CMakeLists.txt`, `CMakeCache.txt` or
//!    `cmake_install.cmake`
//! 2. every directory named `CMakeFiles` (not descended into)
//! 3. the top-level `CMake/` module directory
//!
//! Paths that are already gone are skipped silently.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use bake_core::{application::ApplicationError, error::BakeResult};

/// File names removed anywhere in the tree.
pub const GENERATED_FILES: [&str; 3] = ["CMakeLists.txt", "CMakeCache.txt", "cmake_install.cmake"];

/// Directory names removed anywhere in the tree.
pub const GENERATED_DIRS: [&str; 1] = ["CMakeFiles"];

/// Top-level directory holding generated finder modules.
pub const MODULE_DIR: &str = "CMake";

/// Deletes generated files below a root directory.
#[derive(Debug, Clone)]
pub struct GeneratedFileCleaner {
    root: PathBuf,
}

impl GeneratedFileCleaner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths `clean` would remove, without removing anything.
    pub fn plan(&self) -> BakeResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::OutputNotWritable {
                path: self.root.clone(),
            }
            .into());
        }

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        let mut walker = WalkDir::new(&self.root).min_depth(1).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                reason: e.to_string(),
            })?;
            let name = entry.file_name().to_string_lossy();

            if entry.file_type().is_dir() {
                if GENERATED_DIRS.contains(&name.as_ref()) {
                    dirs.push(entry.path().to_path_buf());
                    walker.skip_current_dir();
                }
            } else if GENERATED_FILES.contains(&name.as_ref()) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        dirs.sort();

        let module_dir = self.root.join(MODULE_DIR);
        if module_dir.is_dir() {
            dirs.push(module_dir);
        }

        files.extend(dirs);
        Ok(files)
    }

    /// Remove every planned path and return what was removed.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn clean(&self) -> BakeResult<Vec<PathBuf>> {
        let planned = self.plan()?;
        let mut removed = Vec::with_capacity(planned.len());

        for path in planned {
            if !path.exists() {
                debug!(path = %path.display(), "Already gone");
                continue;
            }
            let result = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            result.map_err(|e| ApplicationError::FilesystemError {
                path: path.clone(),
                reason: format!("Failed to remove: {e}"),
            })?;
            debug!(path = %path.display(), "Removed");
            removed.push(path);
        }

        info!(removed = removed.len(), "Clean complete");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn generated_tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "CMakeLists.txt");
        touch(root, "CMakeCache.txt");
        touch(root, "configure");
        touch(root, "main.c");
        touch(root, "src/CMakeLists.txt");
        touch(root, "src/cmake_install.cmake");
        touch(root, "src/util.c");
        touch(root, "CMakeFiles/CMakeOutput.log");
        touch(root, "src/CMakeFiles/demo.dir/main.c.o");
        touch(root, "CMake/FindRagel.cmake");
        dir
    }

    #[test]
    fn removes_generated_and_keeps_sources() {
        let dir = generated_tree();
        let root = dir.path();

        let removed = GeneratedFileCleaner::new(root).clean().unwrap();

        assert_eq!(removed.len(), 7);
        assert!(!root.join("CMakeLists.txt").exists());
        assert!(!root.join("src/CMakeLists.txt").exists());
        assert!(!root.join("src/cmake_install.cmake").exists());
        assert!(!root.join("CMakeFiles").exists());
        assert!(!root.join("src/CMakeFiles").exists());
        assert!(!root.join("CMake").exists());

        assert!(root.join("main.c").exists());
        assert!(root.join("src/util.c").exists());
        assert!(root.join("configure").exists());
    }

    #[test]
    fn does_not_descend_into_cmakefiles() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "CMakeFiles/nested/CMakeLists.txt");

        let planned = GeneratedFileCleaner::new(dir.path()).plan().unwrap();
        assert_eq!(planned, vec![dir.path().join("CMakeFiles")]);
    }

    #[test]
    fn clean_tree_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.c");

        let removed = GeneratedFileCleaner::new(dir.path()).clean().unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeneratedFileCleaner::new(dir.path().join("missing"))
            .clean()
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
