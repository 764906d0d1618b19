// ============================================================================
// domain/error.rs - CONTRACT VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a caller-side contract violation: the model was driven
/// with arguments it cannot render. None of them are recoverable by retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Argument shape
    // ========================================================================
    #[error("{what} must not be empty")]
    EmptyName { what: &'static str },

    #[error("Invalid subdirectory '{name}': {reason}")]
    InvalidSubdirectory { name: String, reason: String },

    #[error("Unknown finder type '{0}'")]
    UnknownFinderKind(String),

    #[error("Unknown library type '{0}'")]
    UnknownLibraryKind(String),

    #[error("Invalid finder name '{0}': it must be a single file name")]
    InvalidFinderName(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    // ========================================================================
    // Model state
    // ========================================================================
    #[error("No project set")]
    MissingProjectIdentity,

    #[error("Unknown subdirectory '{0}'")]
    UnknownSubdirectory(String),

    // ========================================================================
    // Artifact set
    // ========================================================================
    #[error("Duplicate artifact path: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProjectIdentity => vec![
                "Declare the project before generating".into(),
                "Add a [project] table with `id` and `name` to the Bakefile".into(),
            ],
            Self::UnknownFinderKind(kind) => vec![
                format!("'{}' is not a known finder type", kind),
                "Supported finder types: executable".into(),
            ],
            Self::UnknownLibraryKind(kind) => vec![
                format!("'{}' is not a known library type", kind),
                "Supported library types: static, shared, module, object, interface".into(),
            ],
            Self::InvalidFinderName(name) => vec![
                format!("'{}' would not produce a loadable Find<Name>.cmake module", name),
                "Use the package name as passed to FIND_PACKAGE, without '/'".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Add the `{}` field to the finder description", field),
            ],
            Self::InvalidSubdirectory { name, .. } => vec![
                format!("Subdirectory '{}' must be a relative path inside the project", name),
                "Remove leading '/' and any '..' segments".into(),
            ],
            Self::InvalidRecipe(_) => vec![
                "Check the Bakefile against the documented format".into(),
                "Token lists may be a single string or an array of strings".into(),
            ],
            Self::UnknownSubdirectory(name) => vec![
                format!("Enter subdirectory '{}' before adding targets to it", name),
            ],
            _ => vec!["Check the project description for the offending entry".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
