//! # Stencil CLI
//!
//! Renders files through a directory of templates, driving the template
//! stage the way a streaming file pipeline would.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (explicit file, platform default, or built-ins).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Report any [`CliError`] on stderr and map it to an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

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
mod front_matter;
mod logging;
mod output;

fn main() -> ExitCode {
    // .env may supply STENCIL_TEMPLATES_DIR or NO_COLOR; a missing file is fine.
    let _ = dotenvy::dotenv();

    // --help / --version print to stdout and exit 0; parse errors go to
    // stderr with exit 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        format = ?cli.global.output_format,
        "arguments parsed"
    );

    let report = Report {
        verbose: cli.global.verbose > 0,
        color: !cli.global.no_color && std::io::stderr().is_terminal(),
    };

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            return report.fail(CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            });
        }
    };
    let output = OutputManager::new(&cli.global, &config);

    match run(cli.command, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => report.fail(e),
    }
}

#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Render(args) => commands::render::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// How failures are shown on stderr.
struct Report {
    verbose: bool,
    color: bool,
}

impl Report {
    fn fail(&self, err: CliError) -> ExitCode {
        err.log();
        eprint!("{}", err.report(self.verbose, self.color));
        ExitCode::from(err.exit_code())
    }
}
