//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (StreamRenderer, TemplateStreamer)
//! - **Ports**: Interface definitions (traits) for the template engine and
//!   the host pipeline
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; the rules about
//! contexts and stream states live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{STREAMER_NAME, StreamRenderer, TemplateStreamer};

// Re-export port traits (for adapter implementation)
pub use ports::{Emission, StreamFailure, StreamResult, Streamer, TemplateSet};

pub use error::ApplicationError;
