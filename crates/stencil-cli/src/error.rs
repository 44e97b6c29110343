//! Errors surfaced by the `stencil` binary.
//!
//! Every failure ends up as a [`CliError`]. `main` turns it into a report on
//! stderr (message, optional cause chain, hints) and an exit code chosen by
//! its [`ErrorCategory`].

use std::error::Error as _;
use std::{io, path::PathBuf};

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

use crate::front_matter::FrontMatterError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Templates directory not found: {}", path.display())]
    TemplatesNotFound { path: PathBuf },

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Invalid front matter in {}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Loading templates or building the stage failed.
    #[error("{0}")]
    Core(#[from] StencilError),

    /// The stage rejected one input file.
    #[error("Failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: StencilError,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::FrontMatter { .. } => ErrorCategory::UserError,
            Self::TemplatesNotFound { .. } | Self::InputNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) | Self::Render { source: core, .. } => core.category().into(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// What the user can do about it.
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run with --help to see the accepted arguments".into()]
            }
            Self::TemplatesNotFound { path } => vec![
                format!("'{}' is not a directory", path.display()),
                "Pass --templates DIR or set STENCIL_TEMPLATES_DIR".into(),
                "Or set templates.dir in the config file".into(),
            ],
            Self::InputNotFound { .. } => vec!["Check the file path and try again".into()],
            Self::FrontMatter { source, .. } => vec![
                source.to_string(),
                "Front matter is a TOML table between two '+++' lines at the top of the file"
                    .into(),
            ],
            Self::ConfigError { .. } => vec![format!(
                "The default config file lives at {}",
                crate::config::AppConfig::config_path().display()
            )],
            Self::Core(core) | Self::Render { source: core, .. } => core.suggestions(),
            Self::IoError { .. } => vec!["Check permissions on the paths involved".into()],
        }
    }

    /// Full user-facing report, ANSI-coloured when `color` is set.
    pub fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let mut out = format!(
            "{} {}\n",
            paint("error:", Style::new().red().bold()),
            paint(&self.to_string(), Style::new().bold())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint("caused by:", Style::new().dimmed()),
                    err
                ));
                cause = err.source();
            }
        }

        for hint in self.hints() {
            let label = paint("hint:", Style::new().yellow().bold());
            out.push_str(&format!("{label} {hint}\n"));
        }

        if !verbose && self.source().is_some() {
            let tip = paint("Run with -v to see the full cause.", Style::new().dimmed());
            out.push_str(&format!("{tip}\n"));
        }
        out
    }

    /// Emit the error as a tracing event. Mistakes in the user's input stay
    /// at debug level since [`Self::report`] already shows them.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::debug!(category = ?self.category(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), "{self}")
            }
        }
    }
}

/// Coarse classification, one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, input files or templates.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Rendering => Self::UserError,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

/// Attach a description of the failed operation to an I/O error.
pub trait IoContext<T> {
    fn io_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|e| CliError::IoError {
            message: format!("{}: {e}", what().into()),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{application::ApplicationError, domain::DomainError};

    fn type_mismatch() -> CliError {
        CliError::Render {
            path: PathBuf::from("a.md"),
            source: DomainError::TypeMismatch {
                keyword: "template".into(),
                found: "a number",
            }
            .into(),
        }
    }

    #[test]
    fn exit_codes_follow_category() {
        let invalid = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        let missing = CliError::InputNotFound {
            path: PathBuf::from("x"),
        };
        let config = CliError::Core(StencilError::configuration("no templates"));
        let io = CliError::from(io::Error::other("disk"));

        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn render_failures_are_user_errors() {
        assert_eq!(type_mismatch().category(), ErrorCategory::UserError);

        let exec = CliError::Render {
            path: PathBuf::from("a.md"),
            source: ApplicationError::TemplateExecution {
                template: "page.tmpl".into(),
                reason: "boom".into(),
            }
            .into(),
        };
        assert_eq!(exec.exit_code(), 2);
        assert!(exec.hints().iter().any(|h| h.contains("page.tmpl")));
    }

    #[test]
    fn render_message_names_file_and_cause() {
        let msg = type_mismatch().to_string();
        assert!(msg.contains("a.md"));
        assert!(msg.contains("was not a string"));
    }

    #[test]
    fn templates_not_found_hints_at_flag() {
        let err = CliError::TemplatesNotFound {
            path: PathBuf::from("/nope"),
        };
        assert!(err.hints().iter().any(|h| h.contains("--templates")));
    }

    #[test]
    fn plain_report_has_no_ansi() {
        let report = type_mismatch().report(false, false);
        assert!(report.starts_with("error: Failed to render a.md"));
        assert!(report.contains("hint:"));
        assert!(report.contains("-v"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn optional_sources_are_chained() {
        let bad_toml = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let with_source = CliError::InvalidInput {
            message: "data file 'site.toml' is not valid TOML".into(),
            source: Some(Box::new(bad_toml)),
        };
        assert!(std::error::Error::source(&with_source).is_some());
        assert!(with_source.report(true, false).contains("caused by:"));
        assert!(with_source.report(false, false).contains("Run with -v"));

        let without = CliError::ConfigError {
            message: "unreadable".into(),
            source: None,
        };
        assert!(std::error::Error::source(&without).is_none());
        assert!(!without.report(true, false).contains("caused by:"));
    }

    #[test]
    fn verbose_report_walks_causes() {
        let err = CliError::FrontMatter {
            path: PathBuf::from("a.md"),
            source: FrontMatterError::Unterminated,
        };
        let report = err.report(true, false);
        assert!(report.contains("caused by: front matter opened with '+++' is never closed"));
        assert!(!report.contains("Run with -v"));
    }

    #[test]
    fn colored_report_uses_ansi() {
        let report = type_mismatch().report(false, true);
        assert!(report.contains('\u{1b}'));
    }

    #[test]
    fn io_context_prefixes_message() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        match result.io_context(|| "reading input") {
            Err(CliError::IoError { message, .. }) => {
                assert_eq!(message, "reading input: missing")
            }
            other => panic!("expected IoError, got {other:?}"),
        }
    }
}
