//! Command-line grammar of `stencil`.
//!
//! Parsing only. Handlers in [`crate::commands`] decide what the flags mean.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render files through templates selected by their front matter",
    long_about = "Stencil feeds each input file through a template stage: the file's \
                  TOML front matter picks a template from a directory of *.tmpl files, \
                  and the template receives the file body as `Content`.",
    after_help = "EXAMPLES:\n\
        \x20 stencil render --templates ./templates index.md about.md\n\
        \x20 stencil render -t ./templates --out ./public --data site.toml pages/*.md\n\
        \x20 stencil list --templates ./templates\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render files through their templates.
    #[command(
        visible_alias = "r",
        about = "Render files through templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil render -t ./templates page.md\n\
            \x20 stencil render -t ./templates --default-template page.tmpl notes/*.txt\n\
            \x20 stencil render -t ./templates --keyword layout --out ./site *.md\n\n\
            FRONT MATTER:\n\
            \x20 A file may start with TOML between two `+++` lines:\n\n\
            \x20   +++\n\
            \x20   template = \"page.tmpl\"\n\
            \x20   title = \"Home\"\n\
            \x20   +++\n\n\
            \x20 The table is available to the template as `frontmatter`."
    )]
    Render(RenderArgs),

    /// List the templates in a directory.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil list -t ./templates\n\
            \x20 stencil list -t ./templates --output-format json"
    )]
    List(ListArgs),

    /// Print a completion script for SHELL.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where to find templates.
#[derive(Debug, Clone, Args)]
pub struct TemplatesArgs {
    /// Root directory of `*.tmpl` files.
    ///
    /// Falls back to `templates.dir` from the configuration file.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        env = "STENCIL_TEMPLATES_DIR",
        help = "Templates directory"
    )]
    pub dir: Option<PathBuf>,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `stencil render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub templates: TemplatesArgs,

    /// Files to render, in order.
    #[arg(value_name = "FILE", required = true, help = "Files to render")]
    pub files: Vec<PathBuf>,

    /// Context key naming a file's template.
    #[arg(
        short = 'k',
        long = "keyword",
        value_name = "KEY",
        help = "Front-matter key that selects the template [default: template]"
    )]
    pub keyword: Option<String>,

    /// Pass a file through unchanged when its template key is not a string.
    #[arg(
        long = "ignore-template-errors",
        help = "Pass files with a non-string template key through unchanged"
    )]
    pub ignore_template_errors: bool,

    /// Do not expose front matter to templates.
    #[arg(
        long = "no-front-matter",
        help = "Do not expose front matter to templates"
    )]
    pub no_front_matter: bool,

    /// TOML file exposed to every template as `data`.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "TOML file exposed to templates as `data`"
    )]
    pub data: Option<PathBuf>,

    /// Template for files whose front matter names none.
    #[arg(
        long = "default-template",
        value_name = "NAME",
        help = "Template for files that do not select one"
    )]
    pub default_template: Option<String>,

    /// Bytes per chunk fed to the stage.
    #[arg(
        long = "chunk-size",
        value_name = "BYTES",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Bytes per chunk fed to the template stage"
    )]
    pub chunk_size: Option<u64>,

    /// Write each result to `DIR/<file name>` instead of stdout.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: stdout)"
    )]
    pub out: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub templates: TemplatesArgs,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

// ── tests ─────────────────────────────────────────────────────────────────────
