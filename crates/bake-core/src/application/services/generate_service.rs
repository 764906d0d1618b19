//! Generate Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Check the output root
//! 2. Emit the model (fails before any write when no project is set)
//! 3. Write every artifact, then mark executables
//!
//! Marking the bootstrap script executable is the only step allowed to fail
//! softly: the script still runs via `sh configure`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ScriptTemplateSource},
    },
    domain::{DomainValidator as validator, GeneratedArtifactSet, ProjectModel},
    error::BakeResult,
};

/// What a generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Absolute (output-rooted) paths written, in write order.
    pub written: Vec<PathBuf>,
    /// Non-fatal problems, e.g. a failed chmod.
    pub warnings: Vec<String>,
}

/// Main generation service.
pub struct GenerateService {
    templates: Box<dyn ScriptTemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(templates: Box<dyn ScriptTemplateSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            templates,
            filesystem,
        }
    }

    /// Emit without writing (dry runs, previews).
    pub fn preview(&self, model: &ProjectModel) -> BakeResult<GeneratedArtifactSet> {
        self.render(model, Utc::now())
    }

    /// Emit `model` and write the artifacts below `output_root`.
    #[instrument(skip_all, fields(output_path = %output_root.as_ref().display()))]
    pub fn generate(
        &self,
        model: &ProjectModel,
        output_root: impl AsRef<Path>,
    ) -> BakeResult<GenerationReport> {
        self.generate_at(model, output_root, Utc::now())
    }

    /// [`Self::generate`] with a fixed timestamp.
    pub fn generate_at(
        &self,
        model: &ProjectModel,
        output_root: impl AsRef<Path>,
        now: DateTime<Utc>,
    ) -> BakeResult<GenerationReport> {
        let output_root = output_root.as_ref();

        if !self.filesystem.is_writable_dir(output_root) {
            return Err(ApplicationError::OutputNotWritable {
                path: output_root.to_path_buf(),
            }
            .into());
        }

        let artifacts = self.render(model, now)?;
        let report = self.write_all(&artifacts, output_root)?;

        info!(files = report.written.len(), "All files generated successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render(&self, model: &ProjectModel, now: DateTime<Utc>) -> BakeResult<GeneratedArtifactSet> {
        let template = self.templates.load()?;
        let missing = template.missing_placeholders();
        if !missing.is_empty() {
            warn!(?missing, "Configure template lacks placeholders");
        }

        let artifacts = model.emit_at(&template, now)?;
        validator::validate_artifact_set(&artifacts)?;
        Ok(artifacts)
    }

    /// Write all artifacts in emission order.
    fn write_all(
        &self,
        artifacts: &GeneratedArtifactSet,
        output_root: &Path,
    ) -> BakeResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for artifact in artifacts {
            let path = output_root.join(artifact.path.as_path());

            // Ensure parent exists
            if let Some(parent) = path.parent() {
                if !self.filesystem.exists(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }

            info!(path = %artifact.path, "Writing");
            self.filesystem.write_file(&path, &artifact.content)?;

            if artifact.is_executable() {
                if let Err(e) = self.filesystem.set_permissions(&path, true) {
                    warn!(error = %e, path = %path.display(), "Failed making file executable");
                    report
                        .warnings
                        .push(format!("Failed making {} executable.", path.display()));
                }
            }

            report.written.push(path);
        }

        Ok(report)
    }
}
