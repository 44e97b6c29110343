//! Ready-made template stages.
//!
//! Each constructor loads every template under a directory and wraps the
//! result in a [`TemplateStreamer`]. A failed load still yields a streamer;
//! it reports the load error on its first call.

use std::path::Path;

use serde_json::Value;
use tracing::{error, info, instrument};

use stencil_core::{
    application::{StreamRenderer, TemplateStreamer},
    domain::RenderOptions,
    error::StencilResult,
};

use crate::{renderer::MiniJinjaTemplateSet, template_loader::TemplateDirLoader};

/// The stage type produced by this module.
pub type TemplateStage = TemplateStreamer<MiniJinjaTemplateSet>;

/// Load the templates under `dir` into a renderer.
///
/// # Errors
///
/// Any discovery or load error; see [`TemplateDirLoader::load`].
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn new_stream_renderer(
    dir: impl AsRef<Path>,
    options: RenderOptions,
) -> StencilResult<StreamRenderer<MiniJinjaTemplateSet>> {
    let templates = TemplateDirLoader::new(dir.as_ref()).load()?;
    info!(templates = templates.len(), "template set loaded");
    Ok(StreamRenderer::new(templates, options))
}

/// A template stage over `dir` with default options.
pub fn template(dir: impl AsRef<Path>) -> TemplateStage {
    template_with_options(dir, RenderOptions::default())
}

/// A template stage over `dir` with the given options.
pub fn template_with_options(dir: impl AsRef<Path>, options: RenderOptions) -> TemplateStage {
    let renderer = new_stream_renderer(dir, options);
    if let Err(e) = &renderer {
        error!(error = %e, "failed to load templates");
    }
    TemplateStreamer::from_result(renderer)
}

/// A template stage over `dir` exposing `data` to every template as `data`.
pub fn template_with_data(dir: impl AsRef<Path>, data: Value) -> TemplateStage {
    template_with_options(dir, RenderOptions::default().data(data))
}
