// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure logic with no I/O and no template engine.
//! Template parsing and execution are reached through the `TemplateSet`
//! port defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem or network calls
//! - **Plain data**: files, contexts and options are `Clone + PartialEq`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod options;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{Context, FileInfo, FileStream, RenderData};

pub use error::{DomainError, ErrorCategory};

pub use options::{DEFAULT_TEMPLATE_KEYWORD, FRONT_MATTER_KEY, RenderOptions};

pub use value_objects::{TemplateName, ValueKind};
