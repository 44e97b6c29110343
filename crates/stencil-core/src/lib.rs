//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! template stage: a pipeline step that renders each file through a named
//! template chosen by the file's context.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      host pipeline / stencil-cli        │
//! │      (drives the Streamer port)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (TemplateStreamer, StreamRenderer)     │
//! │  per-file buffering + single render     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: TemplateSet)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (template loader, MiniJinjaTemplateSet) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! // `templates` is any loaded `TemplateSet`, e.g. from stencil-adapters.
//! let renderer = StreamRenderer::new(templates, RenderOptions::default());
//! let mut streamer = TemplateStreamer::new(renderer);
//!
//! let mut file = FileInfo::new("index.md");
//! file.ctx.insert("template", "page.tmpl");
//!
//! streamer.stream(Some(file.clone()), Some(b"hello".to_vec())).unwrap(); // Suppressed
//! let out = streamer.stream(Some(file), None).unwrap();                  // rendered
//! streamer.stream(None, None).unwrap();                                  // EndOfStream
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Emission, StreamFailure, StreamRenderer, StreamResult, Streamer,
        TemplateSet, TemplateStreamer,
    };
    pub use crate::domain::{
        Context, DomainError, FileInfo, RenderData, RenderOptions, TemplateName,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
