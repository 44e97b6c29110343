//! Tracing subscriber setup for the binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Logs always go to stderr so they never interleave with
//! rendered content on stdout.
//!
//! | Flags     | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! `RUST_LOG`, when set, replaces the table entirely.

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Workspace crates whose events are shown.
const TARGETS: [&str; 3] = ["stencil", "stencil_core", "stencil_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level(args.verbose, args.quiet))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))
}

fn level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

fn directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
