//! Emission engine: renders a [`ProjectModel`] into a
//! [`GeneratedArtifactSet`].
//!
//! Emission is a pure read of the model. It fails before producing anything
//! when no project identity was set, so callers never see partial output.
//!
//! ## Artifacts
//!
//! | Path | Content |
//! |------|---------|
//! | `CMakeLists.txt` | root descriptor |
//! | `<dir>/CMakeLists.txt` | accumulated text per subdirectory |
//! | `CMake/Find<Name>.cmake` | finder modules, only when any are registered |
//! | `configure` | bootstrap script, executable |
//!
//! Every artifact starts with the same generated-file header.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{
    entities::{
        artifact_set::GeneratedArtifactSet,
        common::{Permissions, RelativePath},
        model::ProjectModel,
    },
    error::DomainError,
};

/// Version stamped into the bootstrap script.
pub const BAKE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canonical project URL stamped into the bootstrap script.
pub const BAKE_URL: &str = "http://bake.gwynne.dyndns.org";

/// Directory holding generated finder modules, relative to the output root.
pub const MODULE_DIR: &str = "CMake";

pub const DESCRIPTOR_FILE: &str = "CMakeLists.txt";

pub const SCRIPT_FILE: &str = "configure";

/// `gmdate('h:i:s m/d/Y T')`-style stamp.
const TIMESTAMP_FORMAT: &str = "%I:%M:%S %m/%d/%Y GMT";

/// Placeholder tokens understood by [`ScriptTemplate::render`].
pub mod placeholders {
    pub const BAKE_VERSION: &str = "@@bake_version@@";
    pub const BAKE_URL: &str = "@@bake_url@@";
    pub const NOW: &str = "@@now@@";
    pub const PACKAGE_OPTIONS: &str = "@@package_options@@";
    pub const PROJECT_NAME: &str = "@@project_name@@";

    pub const ALL: [&str; 5] = [BAKE_VERSION, BAKE_URL, NOW, PACKAGE_OPTIONS, PROJECT_NAME];
}

/// The bootstrap-script template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate(String);

impl ScriptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholders the template does not mention.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        placeholders::ALL
            .into_iter()
            .filter(|p| !self.0.contains(p))
            .collect()
    }

    /// Literal find-and-replace of every placeholder token.
    pub fn render(&self, vars: &ScriptVariables<'_>) -> String {
        let pairs = [
            (placeholders::BAKE_VERSION, vars.bake_version),
            (placeholders::BAKE_URL, vars.bake_url),
            (placeholders::NOW, vars.now),
            (placeholders::PACKAGE_OPTIONS, vars.package_options),
            (placeholders::PROJECT_NAME, vars.project_name),
        ];

        let mut result = self.0.clone();
        for (token, value) in pairs {
            result = result.replace(token, value);
        }
        result
    }
}

/// Values substituted into the bootstrap script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptVariables<'a> {
    pub bake_version: &'a str,
    pub bake_url: &'a str,
    pub now: &'a str,
    pub package_options: &'a str,
    pub project_name: &'a str,
}

/// Header prefixed to every artifact.
pub fn generated_header(now: &str) -> String {
    format!("# This file was generated by Bake at {now}.\n# Do not edit this file directly.\n\n")
}

/// Format a timestamp the way the header expects it.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

impl ProjectModel {
    /// Emit with the current time.
    pub fn emit(&self, template: &ScriptTemplate) -> Result<GeneratedArtifactSet, DomainError> {
        self.emit_at(template, Utc::now())
    }

    /// Emit with a fixed timestamp.
    pub fn emit_at(
        &self,
        template: &ScriptTemplate,
        now: DateTime<Utc>,
    ) -> Result<GeneratedArtifactSet, DomainError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(DomainError::MissingProjectIdentity)?;

        let now = format_timestamp(now);
        let header = generated_header(&now);
        info!(project = identity.id(), "Emitting build descriptors");

        let mut set = GeneratedArtifactSet::new();

        set.add(
            RelativePath::try_new(DESCRIPTOR_FILE)?,
            format!("{header}{}", self.root_descriptor(identity.id(), identity.languages())),
            Permissions::read_write(),
        );

        for subdir in &self.subdirectories {
            debug!(subdirectory = %subdir.name, "Emitting subdirectory descriptor");
            set.add(
                subdir.path.join(DESCRIPTOR_FILE)?,
                format!("{header}{}", subdir.text),
                Permissions::read_write(),
            );
        }

        if !self.finders.is_empty() {
            let module_dir = RelativePath::try_new(MODULE_DIR)?;
            for finder in &self.finders {
                debug!(finder = finder.name(), "Emitting finder module");
                set.add(
                    module_dir.join(finder.filename())?,
                    format!("{header}{}", finder.text()),
                    Permissions::read_write(),
                );
            }
        }

        let package_options = self.options.to_shell_array();
        let script = template.render(&ScriptVariables {
            bake_version: BAKE_VERSION,
            bake_url: BAKE_URL,
            now: &now,
            package_options: &package_options,
            project_name: identity.display_name(),
        });
        set.add(
            RelativePath::try_new(SCRIPT_FILE)?,
            stamp_script(&header, &script),
            Permissions::executable(),
        );

        set.validate()?;
        info!(artifacts = set.len(), "Emission complete");
        Ok(set)
    }

    fn root_descriptor(&self, id: &str, languages: &[String]) -> String {
        let mut out = String::new();

        if let Some(version) = &self.min_version {
            out.push_str(&format!(
                "CMAKE_MINIMUM_REQUIRED(VERSION {version} FATAL_ERROR)\n\n"
            ));
        }
        out.push_str(&format!("PROJECT({id})\n\n"));
        if !self.finders.is_empty() {
            out.push_str(&format!(
                "SET(CMAKE_MODULE_PATH ${{CMAKE_MODULE_PATH}} \"${{CMAKE_SOURCE_DIR}}/{MODULE_DIR}\")\n\n"
            ));
        }
        for language in languages {
            out.push_str(&format!("ENABLE_LANGUAGE({language})\n"));
        }
        out.push('\n');
        out.push_str(&self.root_text);
        out.push('\n');
        for subdir in &self.subdirectories {
            out.push_str(&format!("ADD_SUBDIRECTORY({})\n", subdir.name));
        }
        out
    }
}

/// Put the header after a `#!` line so the script stays executable.
fn stamp_script(header: &str, script: &str) -> String {
    if script.starts_with("#!") {
        let (shebang, rest) = match script.find('\n') {
            Some(idx) => script.split_at(idx + 1),
            None => (script, ""),
        };
        let mut out = String::with_capacity(script.len() + header.len() + 1);
        out.push_str(shebang);
        if !shebang.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(header);
        out.push_str(rest);
        out
    } else {
        format!("{header}{script}")
    }
}
