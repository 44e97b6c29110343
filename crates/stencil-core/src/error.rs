//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
///
/// This enum wraps all possible errors that can occur when using stencil-core,
/// providing a unified interface for error handling. It is `Clone` so a
/// streamer built from a failed load can report the same error on every call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StencilError {
    /// Errors from the domain layer (context and protocol violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading and execution failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl StencilError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check the templates directory and options, then try again".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Protocol => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether this is the type-mismatch case `ignore_template_errors` covers.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Domain(DomainError::TypeMismatch { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Rendering,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = StencilError::configuration("at least one template path is required");
        assert_eq!(
            err.to_string(),
            "Configuration error: at least one template path is required"
        );
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn domain_errors_convert_and_keep_message() {
        let err: StencilError = DomainError::TypeMismatch {
            keyword: "template".into(),
            found: "a boolean",
        }
        .into();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().starts_with(r#"Ctx["template"] was not a string"#));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn protocol_errors_are_internal() {
        let err: StencilError = DomainError::ContentAfterFinalize {
            file: "a.md".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_type_mismatch());
    }

    #[test]
    fn io_errors_are_internal() {
        let err: StencilError = ApplicationError::Io {
            path: "templates/a.tmpl".into(),
            reason: "permission denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }
}
