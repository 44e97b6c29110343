// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (a held construction error is replayed on every stream call)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Context Errors
    // ========================================================================
    /// The context value under the template keyword is not a string.
    #[error("Ctx[\"{keyword}\"] was not a string (found {found})")]
    TypeMismatch { keyword: String, found: &'static str },

    // ========================================================================
    // Naming Errors
    // ========================================================================
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    // ========================================================================
    // Stream Protocol Violations
    // ========================================================================
    /// A content chunk arrived for a file whose stream was already finalized.
    #[error("Content received for finalized file '{file}'")]
    ContentAfterFinalize { file: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TypeMismatch { keyword, found } => vec![
                format!("The '{keyword}' context entry must name a template, got {found}"),
                "Set it to a template name such as \"page.tmpl\"".into(),
                "Or enable ignore_template_errors to pass such files through".into(),
            ],
            Self::InvalidTemplateName { name, .. } => vec![
                format!("Template '{name}' could not be named"),
                "Template names are paths relative to the templates directory".into(),
            ],
            Self::ContentAfterFinalize { file } => vec![
                format!("File '{file}' was already rendered"),
                "Send the terminal marker only once per file".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. } | Self::InvalidTemplateName { .. } => {
                ErrorCategory::Validation
            }
            Self::ContentAfterFinalize { .. } => ErrorCategory::Protocol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Protocol,
}
