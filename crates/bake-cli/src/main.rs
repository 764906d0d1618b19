//! # Bake CLI
//!
//! Wrapper generator for the CMake build system.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Filesystem / internal error              |
//! |  2   | Usage error or recipe Bake cannot render |
//! |  4   | Configuration error                      |

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Argument-parse failure: clap's own message, exit 2.
            eprint!("{}", render_clap(&e, std::io::stderr().is_terminal()));
            return ExitCode::from(2);
        }
        Err(e) => {
            // --help / --version
            print!("{}", render_clap(&e, std::io::stdout().is_terminal()));
            return ExitCode::SUCCESS;
        }
    };
    let verbose = cli.global.verbose > 0;

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                verbose,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli.command, config, output) {
        Ok(()) => {
            info!("Bake completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Clap's rendering, with ANSI styling only for a terminal.
fn render_clap(err: &clap::Error, styled: bool) -> String {
    let rendered = err.render();
    if styled {
        rendered.ansi().to_string()
    } else {
        rendered.to_string()
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Clean(args) => commands::clean::execute(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::License => commands::license::execute(output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // Colour only when stderr is a TTY (same logic as logging.rs).
    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
