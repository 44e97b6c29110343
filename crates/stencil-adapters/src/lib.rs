//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all filesystem access and the MiniJinja template engine.

pub mod renderer;
pub mod streamer;
pub mod template_loader;

// Re-export commonly used adapters
pub use renderer::MiniJinjaTemplateSet;
pub use streamer::{
    TemplateStage, new_stream_renderer, template, template_with_data, template_with_options,
};
pub use template_loader::{
    TEMPLATE_EXTENSION, TemplateDirLoader, common_base, discover_template_files, load_templates,
};
