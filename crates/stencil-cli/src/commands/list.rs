//! Implementation of the `stencil list` command.

use tracing::instrument;

use stencil_adapters::{TemplateDirLoader, load_templates};
use stencil_core::application::TemplateSet;

use crate::{
    cli::{ListArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Print the name of every template under the templates directory.
///
/// All templates are parsed, so a broken template fails the listing the
/// same way it would fail a render.
#[instrument(skip_all)]
pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = super::templates_dir(&args.templates, &config)?;
    let loader = TemplateDirLoader::new(&dir);

    let paths = loader.discover()?;
    if paths.is_empty() {
        if output.format() == OutputFormat::Json {
            output.json(&Vec::<String>::new())?;
        } else {
            output.warning(&format!("No templates found in {}", dir.display()))?;
        }
        return Ok(());
    }

    let names = load_templates(&paths)?.names();

    match output.format() {
        OutputFormat::Json => output.json(&names)?,
        OutputFormat::Human => {
            output.header(&format!("Templates in {}:", dir.display()))?;
            for name in &names {
                output.print(&format!("  {name}"))?;
            }
        }
        OutputFormat::Plain | OutputFormat::Auto => {
            for name in &names {
                output.print(name.as_str())?;
            }
        }
    }

    Ok(())
}
