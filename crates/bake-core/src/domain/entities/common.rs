use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to be relative and to stay below its root.
///
/// Invariant: never absolute, never empty, never contains `..` or `.`
/// segments. Construction normalizes `./src` and `src/` to `src`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::InvalidSubdirectory {
                name: path.display().to_string(),
                reason: "parent directory segments are not allowed".into(),
            });
        }

        let normalized: PathBuf = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        if normalized.as_os_str().is_empty() {
            return Err(DomainError::InvalidSubdirectory {
                name: path.display().to_string(),
                reason: "path names no directory below the project root".into(),
            });
        }
        Ok(Self(normalized))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Capability-based permissions model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    readable: bool,
    writable: bool,
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
        }
    }

    /// Read/write plus the execute bit (bootstrap scripts).
    pub const fn executable() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: true,
        }
    }

    pub const fn readable(&self) -> bool {
        self.readable
    }
    pub const fn writable(&self) -> bool {
        self.writable
    }
    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn relative_path_rejects_parent_segments() {
        assert!(matches!(
            RelativePath::try_new("src/../../out"),
            Err(DomainError::InvalidSubdirectory { .. })
        ));
    }

    #[test]
    fn relative_path_rejects_current_dir() {
        for path in [".", "./", "", "./."] {
            assert!(
                matches!(
                    RelativePath::try_new(path),
                    Err(DomainError::InvalidSubdirectory { .. })
                ),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn relative_path_normalizes_aliases() {
        let plain = RelativePath::try_new("src/lexer").unwrap();
        for alias in ["./src/lexer", "src/lexer/", "src/./lexer", "src//lexer"] {
            assert_eq!(RelativePath::try_new(alias).unwrap(), plain, "{alias}");
        }
        assert_eq!(plain.to_string(), "src/lexer");
    }

    #[test]
    fn relative_path_join_keeps_invariant() {
        let p = RelativePath::try_new("lib").unwrap();
        assert_eq!(
            p.join("CMakeLists.txt").unwrap().as_path(),
            Path::new("lib/CMakeLists.txt")
        );
        assert!(p.join("..").is_err());
    }
}
