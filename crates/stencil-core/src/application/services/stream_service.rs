//! Stream Service - adapts the chunked pipeline protocol to whole-file
//! rendering.
//!
//! The pipeline calls [`Streamer::stream`] once per content chunk, once more
//! with an absent chunk to end a file, and once with an absent file to end
//! the run. Templates need a file's complete content, so chunks are held per
//! file until its terminal marker arrives:
//!
//! ```text
//! (file, Some(bytes))  → buffer, emit nothing
//! (file, None)         → finalize: render buffered content once, drop state
//! (None, _)            → forward end-of-stream, drop all state
//! ```
//!
//! A file's state lives only between its first chunk and its terminal
//! marker. Content arriving for the same file afterwards starts a new
//! stream.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, instrument, trace};

use crate::{
    application::{
        ports::{Emission, StreamFailure, StreamResult, Streamer, TemplateSet},
        services::StreamRenderer,
    },
    domain::{FileInfo, FileStream},
    error::{StencilError, StencilResult},
};

/// Name this stage reports to the pipeline.
pub const STREAMER_NAME: &str = "stencil::template";

/// Pipeline stage rendering each file through its selected template.
///
/// Built from the outcome of loading a template set. A failed load does not
/// prevent construction; instead the error is reported on every call so the
/// pipeline surfaces it at the first file.
pub struct TemplateStreamer<T> {
    renderer: StencilResult<StreamRenderer<T>>,
    streams: HashMap<PathBuf, FileStream>,
}

impl<T: TemplateSet> TemplateStreamer<T> {
    pub fn new(renderer: StreamRenderer<T>) -> Self {
        Self::from_result(Ok(renderer))
    }

    /// Wrap the outcome of building a renderer, keeping a failure for replay.
    pub fn from_result(renderer: StencilResult<StreamRenderer<T>>) -> Self {
        Self {
            renderer,
            streams: HashMap::new(),
        }
    }

    /// The renderer, unless construction failed.
    pub fn renderer(&self) -> Option<&StreamRenderer<T>> {
        self.renderer.as_ref().ok()
    }

    /// The construction error, if any.
    pub fn construction_error(&self) -> Option<&StencilError> {
        self.renderer.as_ref().err()
    }

    /// Number of files still collecting content.
    pub fn in_flight(&self) -> usize {
        self.streams.len()
    }
}

impl<T: TemplateSet> Streamer for TemplateStreamer<T> {
    fn name(&self) -> &str {
        STREAMER_NAME
    }

    #[instrument(skip_all, fields(
        file = ?file.as_ref().map(FileInfo::id),
        bytes = chunk.as_ref().map(Vec::len),
    ))]
    fn stream(&mut self, file: Option<FileInfo>, chunk: Option<Vec<u8>>) -> StreamResult {
        let renderer = match &self.renderer {
            Ok(renderer) => renderer,
            Err(e) => {
                return Err(StreamFailure {
                    file,
                    chunk,
                    error: e.clone(),
                });
            }
        };

        let Some(file) = file else {
            debug!(dropped = self.streams.len(), "end of stream");
            self.streams.clear();
            return Ok(Emission::EndOfStream);
        };

        let id = file.id();

        match chunk {
            Some(chunk) if !chunk.is_empty() => {
                let stream = self.streams.entry(id.clone()).or_default();
                match stream.append(&id, &chunk) {
                    Ok(buffered) => {
                        trace!(buffered, "buffered chunk");
                        Ok(Emission::Suppressed)
                    }
                    Err(e) => Err(StreamFailure::preserving(file, chunk, e)),
                }
            }
            _ => match self.streams.remove(&id).and_then(|mut s| s.finalize()) {
                None => {
                    trace!("nothing buffered, forwarding terminal marker");
                    Ok(Emission::Chunk { file, chunk: None })
                }
                Some(content) => renderer.render(file, content).map(|(file, rendered)| {
                    Emission::Chunk {
                        file,
                        chunk: Some(rendered),
                    }
                }),
            },
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
