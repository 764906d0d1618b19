//! Unified error handling for Bake Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Bake Core operations.
///
/// Two kinds of failure exist: contract violations (`Domain`) and
/// environment failures (`Application`). Neither is retried.
#[derive(Debug, Error, Clone)]
pub enum BakeError {
    /// Caller drove the model with arguments it cannot render.
    #[error("Programmer error: {0}")]
    Domain(#[from] DomainError),

    /// The environment refused an operation (filesystem, template source).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BakeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in Bake".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::ContractViolation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ContractViolation,
    Environment,
    Internal,
}

/// Convenient result type alias.
pub type BakeResult<T> = Result<T, BakeError>;
