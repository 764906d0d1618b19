//! Infrastructure adapters for Bake.
//!
//! This crate implements the ports defined in `bake-core::application::ports`
//! and the file-level collaborators around them: recipe loading and
//! cleaning of generated trees. It contains all I/O.

pub mod cleaner;
pub mod filesystem;
pub mod recipe_loader;
pub mod script_template;

// Re-export commonly used adapters
pub use cleaner::GeneratedFileCleaner;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use recipe_loader::{DEFAULT_RECIPE, Recipe, RecipeLoader};
pub use script_template::{BuiltinScriptTemplate, FileScriptTemplate, template_source};
