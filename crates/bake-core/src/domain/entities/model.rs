//! The project model: identity, per-directory descriptor text, finder
//! modules and the option registry.
//!
//! There is no ambient "current subdirectory". [`ProjectModel::enter_subdirectory`]
//! hands back a [`Location`] cursor and every text-producing operation takes
//! one explicitly. [`ProjectModel::at`] wraps a cursor into a [`DirScope`] for
//! fluent use.

use tracing::debug;

use crate::domain::{
    entities::{
        common::RelativePath,
        finder::{FinderDescriptor, FinderModule},
        identity::ProjectIdentity,
        options::OptionRegistry,
        statement::Statement,
    },
    error::DomainError,
    value_objects::{LibraryKind, TokenList},
};

/// Which descriptor buffer an operation appends to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// The top-level `CMakeLists.txt`.
    Root,
    /// A registered subdirectory, by name.
    Subdirectory(String),
}

impl Location {
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Subdirectory(name) => f.write_str(name),
        }
    }
}

/// Accumulated descriptor text for one subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirectoryText {
    pub(crate) path: RelativePath,
    pub(crate) name: String,
    pub(crate) text: String,
}

impl SubdirectoryText {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Builder for one project description. Mutated only before emission.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub(crate) identity: Option<ProjectIdentity>,
    pub(crate) min_version: Option<String>,
    pub(crate) root_text: String,
    /// Ordered by first insertion.
    pub(crate) subdirectories: Vec<SubdirectoryText>,
    /// Ordered by first registration; re-registration replaces in place.
    pub(crate) finders: Vec<FinderModule>,
    pub(crate) options: OptionRegistry,
}

impl ProjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Identity & config ─────────────────────────────────────────────────

    /// Set (or overwrite) the project identity.
    pub fn start_project(&mut self, identity: ProjectIdentity) {
        debug!(id = identity.id(), name = identity.display_name(), "Starting project");
        self.identity = Some(identity);
    }

    /// Minimum CMake version asserted at the top of the root descriptor.
    pub fn require_cmake_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        debug!(%version, "Setting minimum CMake version");
        self.min_version = Some(version);
    }

    pub fn identity(&self) -> Option<&ProjectIdentity> {
        self.identity.as_ref()
    }

    pub fn min_version(&self) -> Option<&str> {
        self.min_version.as_deref()
    }

    // ── Text accumulator ──────────────────────────────────────────────────

    /// Cursor for the top-level descriptor.
    pub fn root(&self) -> Location {
        Location::Root
    }

    /// Register `name` on first sight and return a cursor to it.
    ///
    /// Names are normalized first, so `src`, `./src` and `src/` share one
    /// entry. Re-entering an existing subdirectory keeps its text.
    pub fn enter_subdirectory(&mut self, name: impl Into<String>) -> Result<Location, DomainError> {
        let requested = name.into();
        let (path, name) = normalize_subdirectory(&requested)?;

        if self.subdirectory(&name).is_none() {
            debug!(subdirectory = %name, "Registering subdirectory");
            self.subdirectories.push(SubdirectoryText {
                path,
                name: name.clone(),
                text: String::new(),
            });
        } else {
            debug!(subdirectory = %name, "Re-entering subdirectory");
        }

        Ok(Location::Subdirectory(name))
    }

    /// Append raw text to the buffer at `at`. No separator is inserted.
    pub fn append(&mut self, at: &Location, text: &str) -> Result<(), DomainError> {
        let buffer = self.buffer_mut(at)?;
        buffer.push_str(text);
        Ok(())
    }

    /// Validate, render and append one statement.
    pub fn push(&mut self, at: &Location, statement: Statement) -> Result<(), DomainError> {
        statement.validate()?;
        debug!(location = %at, target = statement.label(), "Appending statement");
        let rendered = statement.render();
        self.append(at, &rendered)
    }

    pub fn root_text(&self) -> &str {
        &self.root_text
    }

    /// Look up a subdirectory by any spelling of its name.
    pub fn subdirectory(&self, name: &str) -> Option<&SubdirectoryText> {
        let (_, name) = normalize_subdirectory(name).ok()?;
        self.subdirectories.iter().find(|s| s.name == name)
    }

    pub fn subdirectories(&self) -> &[SubdirectoryText] {
        &self.subdirectories
    }

    /// Text accumulated at `at`.
    pub fn text_at(&self, at: &Location) -> Option<&str> {
        match at {
            Location::Root => Some(&self.root_text),
            Location::Subdirectory(name) => self.subdirectory(name).map(|s| s.text.as_str()),
        }
    }

    fn buffer_mut(&mut self, at: &Location) -> Result<&mut String, DomainError> {
        match at {
            Location::Root => Ok(&mut self.root_text),
            Location::Subdirectory(name) => self
                .subdirectories
                .iter_mut()
                .find(|s| &s.name == name)
                .map(|s| &mut s.text)
                .ok_or_else(|| DomainError::UnknownSubdirectory(name.clone())),
        }
    }

    // ── Target / flag operations ──────────────────────────────────────────

    pub fn add_library(
        &mut self,
        at: &Location,
        name: &str,
        kind: LibraryKind,
        sources: impl Into<TokenList>,
    ) -> Result<(), DomainError> {
        self.push(at, Statement::add_library(name, kind, sources))
    }

    pub fn add_executable(
        &mut self,
        at: &Location,
        name: &str,
        sources: impl Into<TokenList>,
    ) -> Result<(), DomainError> {
        self.push(at, Statement::add_executable(name, sources))
    }

    pub fn add_compiler_flags(
        &mut self,
        at: &Location,
        name: &str,
        flags: impl Into<TokenList>,
    ) -> Result<(), DomainError> {
        self.push(at, Statement::add_compiler_flags(name, flags))
    }

    pub fn target_link_libraries(
        &mut self,
        at: &Location,
        name: &str,
        libraries: impl Into<TokenList>,
    ) -> Result<(), DomainError> {
        self.push(at, Statement::link_libraries(name, libraries))
    }

    pub fn find_package(
        &mut self,
        at: &Location,
        name: &str,
        version_constraint: Option<&str>,
        required: bool,
    ) -> Result<(), DomainError> {
        self.push(
            at,
            Statement::find_package(name, version_constraint.map(str::to_string), required),
        )
    }

    pub fn literal_text(&mut self, at: &Location, text: &str) -> Result<(), DomainError> {
        self.push(at, Statement::literal(text))
    }

    /// Scoped builder bound to `at`.
    pub fn at(&mut self, at: Location) -> DirScope<'_> {
        DirScope { model: self, at }
    }

    // ── Finder registry ───────────────────────────────────────────────────

    /// Generate and register the finder module for `name`.
    ///
    /// Options declared by the descriptor are appended to the option
    /// registry first. A second registration under the same name replaces
    /// the module text but keeps its position.
    pub fn generate_find_command(
        &mut self,
        name: &str,
        descriptor: &FinderDescriptor,
    ) -> Result<(), DomainError> {
        debug!(package = name, "Creating find command");
        let module = FinderModule::generate(name, descriptor)?;

        for option in &descriptor.configure_options {
            self.options.register(option.clone());
        }

        match self.finders.iter_mut().find(|f| f.name() == name) {
            Some(existing) => *existing = module,
            None => self.finders.push(module),
        }
        Ok(())
    }

    pub fn finders(&self) -> &[FinderModule] {
        &self.finders
    }

    pub fn finder(&self, name: &str) -> Option<&FinderModule> {
        self.finders.iter().find(|f| f.name() == name)
    }

    pub fn options(&self) -> &OptionRegistry {
        &self.options
    }
}

/// Validate `name` and return its path plus the canonical `/`-joined name.
fn normalize_subdirectory(name: &str) -> Result<(RelativePath, String), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName {
            what: "Subdirectory name",
        });
    }
    let path = RelativePath::try_new(name).map_err(|e| match e {
        DomainError::InvalidSubdirectory { reason, .. } => DomainError::InvalidSubdirectory {
            name: name.to_string(),
            reason,
        },
        other => DomainError::InvalidSubdirectory {
            name: name.to_string(),
            reason: other.to_string(),
        },
    })?;
    let canonical = path
        .as_path()
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok((path, canonical))
}

/// A [`ProjectModel`] borrowed together with one [`Location`].
pub struct DirScope<'a> {
    model: &'a mut ProjectModel,
    at: Location,
}

impl DirScope<'_> {
    pub fn location(&self) -> &Location {
        &self.at
    }

    pub fn add_library(
        &mut self,
        name: &str,
        kind: LibraryKind,
        sources: impl Into<TokenList>,
    ) -> Result<&mut Self, DomainError> {
        self.model.add_library(&self.at, name, kind, sources)?;
        Ok(self)
    }

    pub fn add_executable(
        &mut self,
        name: &str,
        sources: impl Into<TokenList>,
    ) -> Result<&mut Self, DomainError> {
        self.model.add_executable(&self.at, name, sources)?;
        Ok(self)
    }

    pub fn add_compiler_flags(
        &mut self,
        name: &str,
        flags: impl Into<TokenList>,
    ) -> Result<&mut Self, DomainError> {
        self.model.add_compiler_flags(&self.at, name, flags)?;
        Ok(self)
    }

    pub fn target_link_libraries(
        &mut self,
        name: &str,
        libraries: impl Into<TokenList>,
    ) -> Result<&mut Self, DomainError> {
        self.model.target_link_libraries(&self.at, name, libraries)?;
        Ok(self)
    }

    pub fn find_package(
        &mut self,
        name: &str,
        version_constraint: Option<&str>,
        required: bool,
    ) -> Result<&mut Self, DomainError> {
        self.model
            .find_package(&self.at, name, version_constraint, required)?;
        Ok(self)
    }

    pub fn literal_text(&mut self, text: &str) -> Result<&mut Self, DomainError> {
        self.model.literal_text(&self.at, text)?;
        Ok(self)
    }
}
