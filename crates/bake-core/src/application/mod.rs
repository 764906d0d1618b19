//! Application layer for Bake.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! emission logic itself. All text rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerateService, GenerationReport};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ScriptTemplateSource};

pub use error::ApplicationError;
