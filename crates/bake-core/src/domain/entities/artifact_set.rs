use std::collections::HashSet;
use std::path::Path;

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// Output of emission: relative path → file content, in emission order.
///
/// Contains no business logic, only data. The persistence side decides
/// where the paths are rooted.
#[derive(Debug, Clone, Default)]
pub struct GeneratedArtifactSet {
    pub(crate) artifacts: Vec<Artifact>,
}

impl GeneratedArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: RelativePath, content: String, perms: Permissions) {
        self.artifacts.push(Artifact {
            path,
            content,
            permissions: perms,
        });
    }

    pub fn with_artifact(
        mut self,
        path: RelativePath,
        content: String,
        perms: Permissions,
    ) -> Self {
        self.add(path, content, perms);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(artifact.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: artifact.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        let path = path.as_ref();
        self.artifacts.iter().find(|a| a.path.as_path() == path)
    }

    /// Content of the artifact at `path`, if emitted.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.get(path).map(|a| a.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.artifacts.iter().map(|a| &a.path)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeneratedArtifactSet {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

/// One generated file.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

impl Artifact {
    pub fn is_executable(&self) -> bool {
        self.permissions.executable_flag()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
