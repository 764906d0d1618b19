//! Configure-script template sources.
//!
//! Two sources implement [`ScriptTemplateSource`]:
//!
//! 1. [`BuiltinScriptTemplate`] - the bash script compiled into the binary
//!    from `templates/configure.in`.
//! 2. [`FileScriptTemplate`] - a user-supplied template read at load time
//!    (`--template FILE`, `BAKE_CONFIGURE_TEMPLATE`, or the config file).
//!
//! Both return the raw text; placeholder substitution happens during
//! emission in `bake-core`.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use bake_core::{
    application::{ApplicationError, ports::ScriptTemplateSource},
    domain::ScriptTemplate,
    error::BakeResult,
};

/// Text of the shipped configure template.
pub const BUILTIN_CONFIGURE: &str = include_str!("../templates/configure.in");

/// The template shipped with Bake.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScriptTemplate;

impl ScriptTemplateSource for BuiltinScriptTemplate {
    fn load(&self) -> BakeResult<ScriptTemplate> {
        Ok(ScriptTemplate::new(BUILTIN_CONFIGURE))
    }
}

/// A template read from disk on every load.
#[derive(Debug, Clone)]
pub struct FileScriptTemplate {
    path: PathBuf,
}

impl FileScriptTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScriptTemplateSource for FileScriptTemplate {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> BakeResult<ScriptTemplate> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            ApplicationError::TemplateUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;
        debug!(bytes = text.len(), "Loaded configure template");
        Ok(ScriptTemplate::new(text))
    }
}

/// Pick the file template when a path is given, the built-in one otherwise.
pub fn template_source(path: Option<&Path>) -> Box<dyn ScriptTemplateSource> {
    match path {
        Some(path) => Box::new(FileScriptTemplate::new(path)),
        None => Box::new(BuiltinScriptTemplate),
    }
}
