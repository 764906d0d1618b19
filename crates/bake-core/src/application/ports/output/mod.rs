//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bake-adapters` crate provides implementations.

use crate::domain::ScriptTemplate;
use crate::error::BakeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `bake_adapters::filesystem::LocalFilesystem` (production)
/// - `bake_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BakeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> BakeResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> BakeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory this process can write into.
    fn is_writable_dir(&self, path: &Path) -> bool;
}

/// Port supplying the bootstrap-script template.
///
/// Implemented by:
/// - `bake_adapters::script_template::BuiltinScriptTemplate` (shipped asset)
/// - `bake_adapters::script_template::FileScriptTemplate` (user override)
pub trait ScriptTemplateSource: Send + Sync {
    fn load(&self) -> BakeResult<ScriptTemplate>;
}
