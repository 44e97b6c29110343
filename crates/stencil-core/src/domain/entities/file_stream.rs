use std::path::Path;

use crate::domain::DomainError;

/// Streaming state of one file.
///
/// ```text
///   Accumulating(buf) ──finalize──▶ Finalized
///        ▲    │
///        └────┘ append
/// ```
///
/// `Finalized` is terminal: it yields content at most once and accepts no
/// further chunks. Owners drop a stream once it is finalized, so a later
/// stream for the same file starts from an empty buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStream {
    Accumulating(Vec<u8>),
    Finalized,
}

impl Default for FileStream {
    fn default() -> Self {
        Self::Accumulating(Vec::new())
    }
}

impl FileStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` for `file`, returning the bytes buffered so far.
    pub fn append(&mut self, file: &Path, chunk: &[u8]) -> Result<usize, DomainError> {
        match self {
            Self::Accumulating(buf) => {
                buf.extend_from_slice(chunk);
                Ok(buf.len())
            }
            Self::Finalized => Err(DomainError::ContentAfterFinalize {
                file: file.display().to_string(),
            }),
        }
    }

    /// Move to `Finalized`, returning the buffered content if there was any.
    pub fn finalize(&mut self) -> Option<Vec<u8>> {
        match std::mem::replace(self, Self::Finalized) {
            Self::Accumulating(buf) if !buf.is_empty() => Some(buf),
            _ => None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized)
    }

    /// Bytes buffered so far.
    pub fn len(&self) -> usize {
        match self {
            Self::Accumulating(buf) => buf.len(),
            Self::Finalized => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_until_finalized() {
        let mut stream = FileStream::new();
        assert_eq!(stream.append(Path::new("a"), b"foo").unwrap(), 3);
        assert_eq!(stream.append(Path::new("a"), b"bar").unwrap(), 6);
        assert_eq!(stream.len(), 6);

        assert_eq!(stream.finalize(), Some(b"foobar".to_vec()));
        assert!(stream.is_finalized());
    }

    #[test]
    fn finalize_yields_content_once() {
        let mut stream = FileStream::new();
        stream.append(Path::new("a"), b"foo").unwrap();
        assert!(stream.finalize().is_some());
        assert_eq!(stream.finalize(), None);
    }

    #[test]
    fn empty_stream_finalizes_to_none() {
        let mut stream = FileStream::new();
        assert_eq!(stream.finalize(), None);
        assert!(stream.is_finalized());
    }

    #[test]
    fn finalized_stream_rejects_appends() {
        let mut stream = FileStream::new();
        stream.finalize();

        let err = stream.append(Path::new("pages/a.md"), b"late").unwrap_err();
        assert_eq!(
            err,
            DomainError::ContentAfterFinalize {
                file: "pages/a.md".into()
            }
        );
        assert!(stream.is_empty());
    }
}
