//! Domain value objects: LibraryKind, FinderKind, TokenList.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This
//! file's only job is to define the types, their CMake spellings, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

// ── LibraryKind ──────────────────────────────────────────────────────────────

/// Linkage type passed to `ADD_LIBRARY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryKind {
    Static,
    Shared,
    Module,
    Object,
    Interface,
}

impl LibraryKind {
    /// The keyword CMake expects.
    pub const fn as_cmake(&self) -> &'static str {
        match self {
            Self::Static => "STATIC",
            Self::Shared => "SHARED",
            Self::Module => "MODULE",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cmake())
    }
}

impl FromStr for LibraryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "shared" | "dynamic" => Ok(Self::Shared),
            "module" => Ok(Self::Module),
            "object" => Ok(Self::Object),
            "interface" => Ok(Self::Interface),
            other => Err(DomainError::UnknownLibraryKind(other.to_string())),
        }
    }
}

// ── FinderKind ───────────────────────────────────────────────────────────────

/// What a generated finder module probes for.
///
/// Only executables are probed today; a finder whose kind set does not
/// contain `Executable` still gets a module that reports "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FinderKind {
    Executable,
}

impl FinderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Executable => "executable",
        }
    }
}

impl fmt::Display for FinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "executable" | "exec" | "program" => Ok(Self::Executable),
            other => Err(DomainError::UnknownFinderKind(other.to_string())),
        }
    }
}

// ── TokenList ────────────────────────────────────────────────────────────────

/// A value that may be a single token or a sequence of tokens.
///
/// Sources, compiler flags and link targets all accept either shape; both
/// collapse to one space-joined string when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenList(Vec<String>);

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|t| t.is_empty())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Space-joined rendering.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for TokenList {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for TokenList {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl<S: Into<String>> From<Vec<S>> for TokenList {
    fn from(v: Vec<S>) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String> + Clone> From<&[S]> for TokenList {
    fn from(v: &[S]) -> Self {
        Self(v.iter().cloned().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for TokenList {
    fn from(v: [S; N]) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for TokenList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
