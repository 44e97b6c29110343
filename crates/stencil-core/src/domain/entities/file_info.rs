use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Context;

/// A file flowing through the pipeline.
///
/// `name`/`path` describe where the file currently points (stages may rename
/// or move it); the `original_*` fields keep where it came from. The
/// identity used to key per-file stream state is [`FileInfo::id`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub original_name: String,
    pub original_path: PathBuf,
    pub ctx: Context,
}

impl FileInfo {
    /// Describe the file at `file`, splitting it into directory and name.
    pub fn new(file: impl AsRef<Path>) -> Self {
        let file = file.as_ref();
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path = file.parent().map(Path::to_path_buf).unwrap_or_default();

        Self {
            original_name: name.clone(),
            original_path: path.clone(),
            name,
            path,
            ctx: Context::new(),
        }
    }

    pub fn with_ctx(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Stable identity of this file within one pipeline run.
    pub fn id(&self) -> PathBuf {
        self.original_path.join(&self.original_name)
    }
}
