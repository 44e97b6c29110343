//! Driving (input) ports - called by the host pipeline.
//!
//! A pipeline drives each stage through [`Streamer::stream`], once per
//! content chunk, once more with an absent chunk to end a file, and finally
//! with an absent file to end the whole stream.

use thiserror::Error;

use crate::domain::FileInfo;
use crate::error::StencilError;

/// What a stage hands downstream after one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// Nothing to forward yet; the stage is still collecting content.
    Suppressed,

    /// Forward `chunk` for `file`. `None` is the file's terminal marker.
    Chunk {
        file: FileInfo,
        chunk: Option<Vec<u8>>,
    },

    /// The end-of-stream sentinel, forwarded unchanged.
    EndOfStream,
}

impl Emission {
    /// Bytes carried by this emission, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Chunk {
                chunk: Some(chunk), ..
            } => Some(chunk.as_slice()),
            _ => None,
        }
    }
}

/// A failed stream call.
///
/// Carries whatever the stage could hand back alongside the error, so a
/// failed render can still forward the file's original content.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct StreamFailure {
    pub file: Option<FileInfo>,
    pub chunk: Option<Vec<u8>>,
    #[source]
    pub error: StencilError,
}

impl StreamFailure {
    /// A failure that hands nothing back.
    pub fn bare(error: impl Into<StencilError>) -> Self {
        Self {
            file: None,
            chunk: None,
            error: error.into(),
        }
    }

    /// A failure that hands back the file and its content unchanged.
    pub fn preserving(file: FileInfo, chunk: Vec<u8>, error: impl Into<StencilError>) -> Self {
        Self {
            file: Some(file),
            chunk: Some(chunk),
            error: error.into(),
        }
    }
}

pub type StreamResult = Result<Emission, StreamFailure>;

/// A pipeline stage.
pub trait Streamer {
    /// Stage name, for logs.
    fn name(&self) -> &str;

    /// Handle one call of the chunked protocol.
    fn stream(&mut self, file: Option<FileInfo>, chunk: Option<Vec<u8>>) -> StreamResult;
}
