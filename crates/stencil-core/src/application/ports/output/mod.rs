//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use crate::domain::{RenderData, TemplateName};
use crate::error::StencilResult;

/// Port for a loaded template namespace.
///
/// Implemented by:
/// - `stencil_adapters::renderer::MiniJinjaTemplateSet` (production)
///
/// ## Design Notes
///
/// - Read-only after construction; shared freely between render calls
/// - Templates in one set may include each other by name
/// - Execution failures are reported as `ApplicationError::TemplateExecution`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSet: Send + Sync {
    /// Whether a template is registered under `name`.
    fn contains(&self, name: &str) -> bool;

    /// All registered template names, sorted.
    fn names(&self) -> Vec<TemplateName>;

    /// Execute the template `name` against `data`.
    fn render(&self, name: &str, data: &RenderData) -> StencilResult<String>;
}
