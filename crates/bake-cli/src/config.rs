//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`BAKE_RECIPE`, `BAKE_OUTPUT_DIR`,
//!    `BAKE_CONFIGURE_TEMPLATE`)
//! 3. Config file (`--config`, `BAKE_CONFIG`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bake_adapters::DEFAULT_RECIPE;

pub const ENV_RECIPE: &str = "BAKE_RECIPE";
pub const ENV_OUTPUT_DIR: &str = "BAKE_OUTPUT_DIR";
pub const ENV_CONFIGURE_TEMPLATE: &str = "BAKE_CONFIGURE_TEMPLATE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where `bake generate` reads from and writes to.
    pub generate: GenerateConfig,
    /// Configure-script template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub recipe: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            recipe: PathBuf::from(DEFAULT_RECIPE),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub configure_template: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Overlay `BAKE_*` variables looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(recipe) = non_empty(ENV_RECIPE) {
            self.generate.recipe = PathBuf::from(recipe);
        }
        if let Some(dir) = non_empty(ENV_OUTPUT_DIR) {
            self.generate.output_dir = PathBuf::from(dir);
        }
        if let Some(template) = non_empty(ENV_CONFIGURE_TEMPLATE) {
            self.templates.configure_template = Some(PathBuf::from(template));
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.bake.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "bake", "bake")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".bake.toml"))
    }
}
