//! `stencil completions SHELL`.

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::CliResult;

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_owned();
    generate(args.shell, &mut cmd, bin_name, &mut std::io::stdout());
    Ok(())
}
