//! Bakefile recipe loader.
//!
//! Parses a `Bakefile.toml` into a [`Recipe`] and replays it against a
//! [`ProjectModel`]. Parsing and conversion finish before the model is
//! touched, so a malformed recipe never leaves a half-built model behind.
//!
//! # `Bakefile.toml` format
//!
//! ```toml
//! [project]
//! id             = "demo"            # PROJECT() identifier (required)
//! name           = "Demo Project"    # banner name; defaults to `id`
//! languages      = ["C"]             # optional; default ["C", "CXX"]
//! cmake_minimum  = "2.6"             # optional
//!
//! [[finder]]
//! name         = "Ragel"
//! types        = ["executable"]      # optional; default ["executable"]
//! binary_names = ["ragel"]           # string or array
//! run_macro    = "..."               # optional, copied verbatim
//! version_check     = { command = "${Ragel_EXECUTABLE} -v", status = 0, regex = "..." }
//! configure_options = [{ flag = "with-ragel", variable = "Ragel_EXECUTABLE" }]
//!
//! [[step]]
//! op   = "subdirectory"              # subdirectory | root
//! name = "src"
//!
//! [[step]]
//! op      = "add_executable"         # add_library | add_executable |
//! name    = "demo"                   # add_compiler_flags | target_link_libraries |
//! sources = ["main.c"]               # find_package | literal
//! ```
//!
//! Finders are registered in file order before any step runs. Steps then
//! run in file order; `subdirectory` and `root` move the cursor.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, instrument};

use bake_core::{
    application::ApplicationError,
    domain::{
        ConfigureOption, DomainError, DomainValidator, FinderDescriptor, FinderKind, LibraryKind,
        ProjectIdentity, ProjectModel, Statement, TokenList, VersionCheck,
    },
    error::BakeResult,
};

/// Default recipe file name.
pub const DEFAULT_RECIPE: &str = "Bakefile.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `Bakefile.toml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RecipeManifest {
    pub project: Option<ProjectSection>,
    #[serde(default, rename = "finder")]
    pub finders: Vec<FinderEntry>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepEntry>,
}

/// `[project]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub id: String,
    pub name: Option<String>,
    pub languages: Option<Vec<String>>,
    pub cmake_minimum: Option<String>,
}

/// One `[[finder]]` entry.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FinderEntry {
    pub name: String,
    #[serde(default = "default_finder_types")]
    pub types: Vec<String>,
    #[serde(default)]
    pub binary_names: TokenInput,
    #[serde(default)]
    pub run_macro: String,
    pub version_check: Option<VersionCheckEntry>,
    #[serde(default)]
    pub configure_options: Vec<OptionEntry>,
}

fn default_finder_types() -> Vec<String> {
    vec![FinderKind::Executable.as_str().to_string()]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct VersionCheckEntry {
    pub command: String,
    #[serde(default)]
    pub status: i32,
    pub regex: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    pub flag: String,
    pub variable: String,
}

/// A single token or an array of tokens.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum TokenInput {
    One(String),
    Many(Vec<String>),
}

impl Default for TokenInput {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<TokenInput> for TokenList {
    fn from(input: TokenInput) -> Self {
        match input {
            TokenInput::One(token) => TokenList::from(token),
            TokenInput::Many(tokens) => TokenList::from(tokens),
        }
    }
}

/// One `[[step]]` entry, tagged by `op`.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepEntry {
    Subdirectory {
        name: String,
    },
    Root,
    AddLibrary {
        name: String,
        #[serde(rename = "type", default = "default_library_type")]
        kind: String,
        sources: TokenInput,
    },
    AddExecutable {
        name: String,
        sources: TokenInput,
    },
    AddCompilerFlags {
        name: String,
        flags: TokenInput,
    },
    TargetLinkLibraries {
        name: String,
        libraries: TokenInput,
    },
    FindPackage {
        name: String,
        version: Option<String>,
        #[serde(default)]
        required: bool,
    },
    Literal {
        text: String,
    },
}

fn default_library_type() -> String {
    LibraryKind::Static.as_cmake().to_ascii_lowercase()
}

// ── Typed recipe ──────────────────────────────────────────────────────────────

/// A step after conversion to domain types.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    EnterSubdirectory(String),
    ReturnToRoot,
    Emit(Statement),
}

/// A fully converted recipe, ready to replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub identity: Option<ProjectIdentity>,
    pub cmake_minimum: Option<String>,
    pub finders: Vec<(String, FinderDescriptor)>,
    pub steps: Vec<Step>,
}

impl FromStr for Recipe {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let manifest: RecipeManifest =
            toml::from_str(s).map_err(|e| DomainError::InvalidRecipe(e.to_string()))?;
        Recipe::try_from(manifest)
    }
}

impl TryFrom<RecipeManifest> for Recipe {
    type Error = DomainError;

    fn try_from(manifest: RecipeManifest) -> Result<Self, Self::Error> {
        let (identity, cmake_minimum) = match manifest.project {
            Some(project) => {
                let name = project.name.unwrap_or_else(|| project.id.clone());
                let identity = match project.languages {
                    Some(languages) => ProjectIdentity::new(project.id, name, languages)?,
                    None => ProjectIdentity::with_default_languages(project.id, name)?,
                };
                (Some(identity), project.cmake_minimum)
            }
            None => (None, None),
        };

        let finders = manifest
            .finders
            .into_iter()
            .map(convert_finder)
            .collect::<Result<Vec<_>, _>>()?;

        let steps = manifest
            .steps
            .into_iter()
            .map(convert_step)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            identity,
            cmake_minimum,
            finders,
            steps,
        })
    }
}

fn convert_finder(entry: FinderEntry) -> Result<(String, FinderDescriptor), DomainError> {
    let kinds = entry
        .types
        .iter()
        .map(|t| t.parse::<FinderKind>())
        .collect::<Result<_, _>>()?;

    let descriptor = FinderDescriptor {
        kinds,
        binary_names: TokenList::from(entry.binary_names).tokens().to_vec(),
        version_check: entry
            .version_check
            .map(|v| VersionCheck::new(v.command, v.status, v.regex)),
        run_macro: entry.run_macro,
        configure_options: entry
            .configure_options
            .into_iter()
            .map(|o| ConfigureOption::new(o.flag, o.variable))
            .collect(),
    };

    DomainValidator::validate_finder(&entry.name, &descriptor)?;
    Ok((entry.name, descriptor))
}

fn convert_step(entry: StepEntry) -> Result<Step, DomainError> {
    let statement = match entry {
        StepEntry::Subdirectory { name } => return Ok(Step::EnterSubdirectory(name)),
        StepEntry::Root => return Ok(Step::ReturnToRoot),
        StepEntry::AddLibrary {
            name,
            kind,
            sources,
        } => Statement::add_library(name, kind.parse()?, sources),
        StepEntry::AddExecutable { name, sources } => Statement::add_executable(name, sources),
        StepEntry::AddCompilerFlags { name, flags } => Statement::add_compiler_flags(name, flags),
        StepEntry::TargetLinkLibraries { name, libraries } => {
            Statement::link_libraries(name, libraries)
        }
        StepEntry::FindPackage {
            name,
            version,
            required,
        } => Statement::find_package(name, version, required),
        StepEntry::Literal { text } => Statement::literal(text),
    };

    DomainValidator::validate_statement(&statement)?;
    Ok(Step::Emit(statement))
}

impl Recipe {
    /// Replay the recipe against `model`.
    #[instrument(skip_all)]
    pub fn apply(self, model: &mut ProjectModel) -> Result<(), DomainError> {
        if let Some(version) = self.cmake_minimum {
            model.require_cmake_version(version);
        }
        if let Some(identity) = self.identity {
            model.start_project(identity);
        }

        for (name, descriptor) in &self.finders {
            model.generate_find_command(name, descriptor)?;
        }

        let mut at = model.root();
        for step in self.steps {
            match step {
                Step::EnterSubdirectory(name) => at = model.enter_subdirectory(name)?,
                Step::ReturnToRoot => at = model.root(),
                Step::Emit(statement) => model.push(&at, statement)?,
            }
        }
        Ok(())
    }

    /// Build a fresh model from this recipe.
    pub fn into_model(self) -> Result<ProjectModel, DomainError> {
        let mut model = ProjectModel::new();
        self.apply(&mut model)?;
        Ok(model)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Reads recipes from disk.
#[derive(Debug, Clone)]
pub struct RecipeLoader {
    path: PathBuf,
}

impl RecipeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and convert the recipe. I/O failures are environment errors;
    /// anything wrong with the content is a contract violation.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> BakeResult<Recipe> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            ApplicationError::RecipeUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let recipe: Recipe = text.parse()?;
        debug!(
            finders = recipe.finders.len(),
            steps = recipe.steps.len(),
            "Recipe loaded"
        );
        Ok(recipe)
    }
}
