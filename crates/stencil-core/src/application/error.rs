//! Application layer errors.
//!
//! These errors represent failures while loading or executing templates,
//! not violations of domain rules. Those are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading and executing templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A template file cannot be expressed relative to the namespace base.
    #[error("Cannot name template {path} relative to {base}: {reason}")]
    Path {
        path: PathBuf,
        base: PathBuf,
        reason: String,
    },

    /// Reading a template file or walking the templates directory failed.
    #[error("I/O error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// A template body failed to parse.
    #[error("Failed to parse template '{name}'{}: {reason}", line_suffix(.line))]
    Parse {
        name: String,
        line: Option<usize>,
        reason: String,
    },

    /// Executing a template failed (unknown name or runtime error).
    #[error("Template '{template}' failed to execute: {reason}")]
    TemplateExecution { template: String, reason: String },
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Path { path, base, .. } => vec![
                format!("Template: {}", path.display()),
                format!("Base directory: {}", base.display()),
                "Keep all templates under one directory root".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and is readable".into(),
            ],
            Self::Parse { name, line, .. } => vec![
                match line {
                    Some(line) => format!("Fix the syntax error in '{name}' near line {line}"),
                    None => format!("Fix the syntax error in '{name}'"),
                },
                "Templates use Jinja syntax: {{ Content }}, {% include \"name\" %}".into(),
            ],
            Self::TemplateExecution { template, .. } => vec![
                format!("Check that '{template}' exists: stencil list --templates <DIR>"),
                "Names are paths relative to the templates directory".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Path { .. } | Self::Parse { .. } => ErrorCategory::Validation,
            Self::Io { .. } => ErrorCategory::Internal,
            Self::TemplateExecution { .. } => ErrorCategory::Rendering,
        }
    }
}
