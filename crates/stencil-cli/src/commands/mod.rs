//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the adapters and core
//! crates and report results through [`crate::output::OutputManager`].

use std::path::PathBuf;

use crate::{
    cli::TemplatesArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod completions;
pub mod list;
pub mod render;

/// Templates directory from the flag (or its env var) or the config file.
pub(crate) fn templates_dir(args: &TemplatesArgs, config: &AppConfig) -> CliResult<PathBuf> {
    let dir = args
        .dir
        .clone()
        .or_else(|| config.templates.dir.clone())
        .ok_or_else(|| CliError::InvalidInput {
            message: "no templates directory given; pass --templates DIR or set templates.dir"
                .into(),
            source: None,
        })?;

    if !dir.is_dir() {
        return Err(CliError::TemplatesNotFound { path: dir });
    }
    Ok(dir)
}
