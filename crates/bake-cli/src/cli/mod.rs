//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No generation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Text printed by `--version`.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    env!("CARGO_PKG_HOMEPAGE"),
    "\nCopyright (c) 2009-2010, Gwynne Raskind\nAll rights reserved.\n\n",
    "All code generated by Bake is placed under the license of the project which\n",
    "distributes it, or Bake's own license, whichever is less permissive. Bake\n",
    "itself is distributed under the two-clause BSD License. Run `bake license`\n",
    "for more information."
);

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "bake",
    bin_name = "bake",
    version  = env!("CARGO_PKG_VERSION"),
    long_version = LONG_VERSION,
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Wrapper generator for the CMake build system",
    long_about = "Bake turns a Bakefile.toml recipe into CMakeLists.txt files, \
                  CMake finder modules and an autoconf-style ./configure script.",
    after_help = "EXAMPLES:\n\
        \x20 bake generate\n\
        \x20 bake generate -f build/Bakefile.toml -o build\n\
        \x20 bake generate --dry-run --output-format json\n\
        \x20 bake clean -o build\n\
        \x20 bake completions bash > /usr/share/bash-completion/completions/bake",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate build descriptors from a recipe.
    #[command(
        visible_alias = "g",
        about = "Generate CMake files and the configure script",
        after_help = "EXAMPLES:\n\
            \x20 bake generate\n\
            \x20 bake generate -o build --template my-configure.in\n\
            \x20 bake generate --dry-run"
    )]
    Generate(GenerateArgs),

    /// Remove generated and CMake-produced files.
    #[command(
        about = "Clean generated files",
        after_help = "EXAMPLES:\n\
            \x20 bake clean\n\
            \x20 bake clean -o build --dry-run"
    )]
    Clean(CleanArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 bake completions bash > ~/.local/share/bash-completion/completions/bake\n\
            \x20 bake completions zsh  > ~/.zfunc/_bake\n\
            \x20 bake completions fish > ~/.config/fish/completions/bake.fish"
    )]
    Completions(CompletionsArgs),

    /// Display Bake's license.
    #[command(about = "Display Bake's license and exit")]
    License,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `bake generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Destination for all output files and directories.
    #[arg(
        short = 'o',
        long = "output-path",
        value_name = "DIR",
        help = "Output directory (default: .)"
    )]
    pub output: Option<PathBuf>,

    /// Recipe describing the project.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "RECIPE",
        help = "Recipe file (default: Bakefile.toml)"
    )]
    pub file: Option<PathBuf>,

    /// Custom configure-script template.
    #[arg(
        long = "template",
        value_name = "FILE",
        help = "Configure script template (default: built-in)"
    )]
    pub template: Option<PathBuf>,

    /// List what would be written without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── clean ─────────────────────────────────────────────────────────────────────

/// Arguments for `bake clean`.
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Directory to clean.
    #[arg(
        short = 'o',
        long = "output-path",
        value_name = "DIR",
        help = "Directory to clean (default: .)"
    )]
    pub output: Option<PathBuf>,

    /// List what would be removed without removing anything.
    #[arg(long = "dry-run", help = "Show what would be removed without removing")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `bake completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "bake",
            "generate",
            "-o",
            "build",
            "-f",
            "Bakefile.toml",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.output, Some(PathBuf::from("build")));
                assert_eq!(args.file, Some(PathBuf::from("Bakefile.toml")));
                assert!(args.dry_run);
                assert!(args.template.is_none());
            }
            other => panic!("expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn generate_alias() {
        let cli = Cli::parse_from(["bake", "g"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn long_output_path_flag() {
        let cli = Cli::parse_from(["bake", "clean", "--output-path=out"]);
        match cli.command {
            Commands::Clean(args) => assert_eq!(args.output, Some(PathBuf::from("out"))),
            other => panic!("expected Clean command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bake", "generate", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["bake", "--quiet", "--verbose", "clean"]);
        assert!(result.is_err());
    }
}
