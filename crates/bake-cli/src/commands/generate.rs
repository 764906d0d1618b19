//! Implementation of the `bake generate` command.
//!
//! Responsibility: resolve paths from flags and config, load the recipe,
//! hand the model to the core generate service, and report. No emission
//! logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use bake_adapters::{LocalFilesystem, RecipeLoader, template_source};
use bake_core::{
    application::{GenerateService, GenerationReport},
    domain::{GeneratedArtifactSet, ProjectModel},
    error::BakeError,
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Paths a generate run works with, after flag/config resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratePlan {
    pub recipe: PathBuf,
    pub output_dir: PathBuf,
    pub template: Option<PathBuf>,
}

impl GeneratePlan {
    /// Flags win over configuration.
    pub fn resolve(args: &GenerateArgs, config: &AppConfig) -> Self {
        Self {
            recipe: args
                .file
                .clone()
                .unwrap_or_else(|| config.generate.recipe.clone()),
            output_dir: args
                .output
                .clone()
                .unwrap_or_else(|| config.generate.output_dir.clone()),
            template: args
                .template
                .clone()
                .or_else(|| config.templates.configure_template.clone()),
        }
    }
}

/// One line of a dry-run listing.
#[derive(Debug, Serialize)]
struct PlannedFile {
    path: String,
    bytes: usize,
    executable: bool,
}

/// Execute the `bake generate` command.
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let plan = GeneratePlan::resolve(&args, &config);
    debug!(?plan, "Generate plan resolved");

    let model = load_model(&plan.recipe)?;
    let service = GenerateService::new(
        template_source(plan.template.as_deref()),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        let artifacts = service
            .preview(&model)
            .with_cli_context(|| "previewing generated files")?;
        return print_dry_run(&artifacts, &plan.output_dir, &output);
    }

    if let Some(identity) = model.identity() {
        output.header(&format!("Baking {}...", identity.display_name()))?;
    }

    let report = service
        .generate(&model, &plan.output_dir)
        .with_cli_context(|| format!("generating into {}", plan.output_dir.display()))?;

    print_report(&report, &plan.output_dir, &output)?;
    info!(files = report.written.len(), "Generate finished");
    Ok(())
}

/// Read the recipe and replay it into a fresh model.
pub fn load_model(recipe: &Path) -> CliResult<ProjectModel> {
    let recipe = RecipeLoader::new(recipe).load()?;
    let model = recipe.into_model().map_err(BakeError::from)?;
    Ok(model)
}

fn print_report(
    report: &GenerationReport,
    output_dir: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    for path in &report.written {
        let shown = path.strip_prefix(output_dir).unwrap_or(path);
        output.print(&format!("Wrote {}.", shown.display()))?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    output.success("All files generated successfully.")?;
    Ok(())
}

fn print_dry_run(
    artifacts: &GeneratedArtifactSet,
    output_dir: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let files: Vec<PlannedFile> = artifacts
        .iter()
        .map(|a| PlannedFile {
            path: output_dir.join(a.path.as_path()).display().to_string(),
            bytes: a.size(),
            executable: a.is_executable(),
        })
        .collect();

    if output.format() == OutputFormat::Json {
        output.emit(&serde_json::to_string_pretty(&files)?)?;
        return Ok(());
    }

    output.header(&format!(
        "Dry run: would write {} files to {}",
        files.len(),
        output_dir.display()
    ))?;
    for file in &files {
        let mode = if file.executable { " (executable)" } else { "" };
        output.emit(&format!("  {}{mode}", file.path))?;
    }
    Ok(())
}
