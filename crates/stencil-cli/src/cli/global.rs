//! Flags shared by every subcommand.

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more (-v info, -vv debug, -vvv trace).
    ///
    /// Logs go to stderr and never mix with rendered output. `RUST_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour codes (also honours `NO_COLOR`).
    ///
    /// Any `NO_COLOR` value other than a falsey one (`0`, `false`, `no`,
    /// `off`, empty) disables colour.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from FILE instead of the platform config directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Format of status messages and listings.
    ///
    /// Rendered file content is always written raw.
    #[arg(long, global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured, with headers.
    Human,
    /// One item per line, no colour.
    Plain,
    /// Machine-readable JSON.
    Json,
}
