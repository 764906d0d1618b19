//! Application layer errors.
//!
//! These errors represent environment failures during persistence, not
//! contract violations. Contract violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while persisting generated artifacts.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Output root is missing or not writable.
    #[error("Output path {path} isn't a writable directory")]
    OutputNotWritable { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Failed writing to {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Script template could not be loaded.
    #[error("Failed loading configure template from {path}: {reason}")]
    TemplateUnavailable { path: PathBuf, reason: String },

    /// Recipe file could not be read.
    #[error("Failed reading recipe {path}: {reason}")]
    RecipeUnavailable { path: PathBuf, reason: String },

    /// Adapter state lock poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::OutputNotWritable { path } => vec![
                format!("Create the directory first: mkdir -p {}", path.display()),
                "Check that you have write permissions".into(),
                "Pick another location with -o/--output-path".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::TemplateUnavailable { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Omit --template to use the built-in configure template".into(),
            ],
            Self::RecipeUnavailable { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Pass another recipe with -f/--file".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OutputNotWritable { .. }
            | Self::FilesystemError { .. }
            | Self::TemplateUnavailable { .. }
            | Self::RecipeUnavailable { .. } => ErrorCategory::Environment,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
