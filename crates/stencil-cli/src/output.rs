//! Status output on stdout.
//!
//! Messages about what the CLI is doing go through [`OutputManager`], which
//! honours `--quiet`, `--no-color` and `--output-format`. Rendered file
//! content bypasses all of that through [`OutputManager::content`].

use std::io::{self, IsTerminal, Write};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Resolved format, never [`OutputFormat::Auto`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg, None)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(&format!("\u{2713} {msg}"), Some(Style::new().green()))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.line(&format!("\u{26a0} {msg}"), Some(Style::new().yellow()))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(text, Some(Style::new().cyan().bold()))
    }

    /// Pretty-printed JSON. Shown even with `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Raw bytes straight to stdout. Shown even with `--quiet`.
    pub fn content(&self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }

    fn line(&self, text: &str, style: Option<Style>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        match style {
            Some(style) if self.color => self.term.write_line(&text.style(style).to_string()),
            _ => self.term.write_line(text),
        }
    }
}
