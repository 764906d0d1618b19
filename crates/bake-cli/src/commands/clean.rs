//! Implementation of the `bake clean` command.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use bake_adapters::GeneratedFileCleaner;

use crate::{
    cli::{CleanArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Flag first, then configuration.
pub fn resolve_dir(args: &CleanArgs, config: &AppConfig) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| config.generate.output_dir.clone())
}

#[instrument(skip_all)]
pub fn execute(args: CleanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let requested = resolve_dir(&args, &config);
    let dir = std::fs::canonicalize(&requested)
        .with_cli_context(|| format!("Output path {} is invalid", requested.display()))?;
    let cleaner = GeneratedFileCleaner::new(&dir);

    if args.dry_run {
        let planned = cleaner.plan()?;
        return print_paths(&planned, &dir, "Would remove", &output);
    }

    output.header(&format!("Cleaning {}...", dir.display()))?;
    let removed = cleaner.clean()?;
    print_paths(&removed, &dir, "Removed", &output)?;

    info!(removed = removed.len(), "Clean finished");
    if removed.is_empty() {
        output.print("Nothing to clean.")?;
    } else {
        output.success(&format!("Removed {} paths.", removed.len()))?;
    }
    Ok(())
}

fn print_paths(
    paths: &[PathBuf],
    root: &Path,
    verb: &str,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let listing: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        output.emit(&serde_json::to_string_pretty(&listing)?)?;
        return Ok(());
    }

    for path in paths {
        let shown = path.strip_prefix(root).unwrap_or(path);
        output.print(&format!("{verb} {}", shown.display()))?;
    }
    Ok(())
}
